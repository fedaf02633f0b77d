use serde::Serialize;

use crate::simulation_engine::vehicles::Approach;

/// A single traffic light for one approach. Starts red; the counter tracks
/// how many consecutive ticks the light has been green.
#[derive(Debug, Clone, Serialize)]
pub struct TrafficLight {
    pub approach: Approach,
    pub is_green: bool,
    pub time_green: u32,
}

impl TrafficLight {
    pub fn new(approach: Approach) -> Self {
        Self {
            approach,
            is_green: false,
            time_green: 0,
        }
    }

    /// Toggles the light. Turning red zeroes the green counter immediately.
    pub fn switch(&mut self) {
        self.is_green = !self.is_green;
        if !self.is_green {
            self.time_green = 0;
        }
    }

    /// Advances the green counter by one tick; red lights are unchanged.
    pub fn update_time(&mut self) {
        if self.is_green {
            self.time_green += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_red_with_zero_counter() {
        let light = TrafficLight::new(Approach::NorthSouth);
        assert!(!light.is_green);
        assert_eq!(light.time_green, 0);
    }

    #[test]
    fn counter_advances_only_while_green() {
        let mut light = TrafficLight::new(Approach::WestEast);
        light.update_time();
        assert_eq!(light.time_green, 0);

        light.switch();
        for _ in 0..9 {
            light.update_time();
        }
        assert_eq!(light.time_green, 9);

        light.update_time();
        assert_eq!(light.time_green, 10);
    }

    #[test]
    fn turning_red_zeroes_the_counter() {
        let mut light = TrafficLight::new(Approach::NorthSouth);
        light.switch();
        light.update_time();
        light.update_time();
        assert_eq!(light.time_green, 2);

        light.switch();
        assert!(!light.is_green);
        assert_eq!(light.time_green, 0);
    }
}
