pub mod economics;
pub mod entities;
pub mod repositories;

pub use economics::EconomicModel;
pub use entities::SimulatedState;
pub use repositories::StateRepository;
