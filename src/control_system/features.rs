use std::collections::HashMap;

use crate::simulation_engine::{Action, IntersectionState};

/// Sparse feature vector keyed by feature name. Absent keys count as zero
/// when dotted with the weight map.
pub type FeatureVector = HashMap<&'static str, f64>;

/// Maps a (state, action) pair to the basis features of the linear Q-model.
///
/// The function projects which side would be green if `action` were applied
/// (without touching the intersection), so the agent can score an action
/// before committing to it. Queue counts and eagerness sums are divided by
/// 100 to keep magnitudes small relative to the learning rate.
///
/// The bucketed switch features and `switch_inversely_proportional` both
/// encode diminishing urgency to switch as a green phase ages; they are not
/// mutually exclusive, letting the regression pick whichever combination
/// fits the reward data.
pub fn extract(state: &IntersectionState, action: Action) -> FeatureVector {
    let next_ns_green = match action {
        Action::Switch => !state.ns_green,
        Action::Stay => state.ns_green,
    };

    let mut features = FeatureVector::new();
    features.insert("bias", 1.0);

    let (active_cars, inactive_cars, active_weight, inactive_weight) = if next_ns_green {
        (state.ns_cars, state.we_cars, state.ns_weight, state.we_weight)
    } else {
        (state.we_cars, state.ns_cars, state.we_weight, state.ns_weight)
    };

    features.insert("active_lane_cars", active_cars as f64 / 100.0);
    features.insert("inactive_lane_cars", inactive_cars as f64 / 100.0);

    if action == Action::Switch {
        if state.max_time_green < 3 {
            features.insert("switch_very_fast", 1.0);
        } else if state.max_time_green < 5 {
            features.insert("switch_fast", 1.0);
        } else if state.max_time_green < 8 {
            features.insert("switch_moderate", 1.0);
        }

        if state.max_time_green > 0 {
            features.insert(
                "switch_inversely_proportional",
                10.0 / (state.max_time_green as f64 + 1.0),
            );
        }
    }

    if action == Action::Stay && state.max_time_green < 5 {
        features.insert("patience_reward", 1.0);
    }

    features.insert("active_lane_eagerness", active_weight as f64 / 100.0);
    features.insert("inactive_lane_eagerness", inactive_weight as f64 / 100.0);

    features
}
