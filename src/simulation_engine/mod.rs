// simulation_engine/mod.rs
pub mod intersection;
pub mod traffic_lights;
pub mod vehicles;

pub use intersection::{Action, Intersection, IntersectionConfig, IntersectionState, StepOutcome};
pub use traffic_lights::TrafficLight;
pub use vehicles::{Approach, EagernessDistribution, EagernessSampler, Vehicle};
