pub mod evaluations;

pub mod periods;

pub mod system;

pub use evaluations::configure_evaluations_routes;
pub use periods::configure_periods_routes;
pub use system::configure_system_routes;
