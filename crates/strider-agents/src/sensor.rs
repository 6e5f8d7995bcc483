//! Observation and action buffers exchanged with the policy

use glam::Vec3;
use strider_body::ObservationSink;

/// Ordered float vector filled once per decision
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VectorSensor {
    observations: Vec<f32>,
}

impl VectorSensor {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            observations: Vec::with_capacity(capacity),
        }
    }

    pub fn add_f32(&mut self, value: f32) {
        self.observations.push(value);
    }

    pub fn add_bool(&mut self, value: bool) {
        self.observations.push(if value { 1.0 } else { 0.0 });
    }

    pub fn add_vec3(&mut self, value: Vec3) {
        self.observations.extend_from_slice(&value.to_array());
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn clear(&mut self) {
        self.observations.clear();
    }
}

impl ObservationSink for VectorSensor {
    fn add_observation(&mut self, value: f32) {
        self.add_f32(value);
    }
}

/// Shape of the actions an agent consumes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActionSpec {
    /// Number of continuous actions, each in `[-1, 1]`
    pub continuous: usize,
    /// Size of each discrete branch
    pub discrete_branches: Vec<usize>,
}

impl ActionSpec {
    pub fn continuous(size: usize) -> Self {
        Self {
            continuous: size,
            discrete_branches: Vec::new(),
        }
    }

    pub fn discrete(branches: Vec<usize>) -> Self {
        Self {
            continuous: 0,
            discrete_branches: branches,
        }
    }
}

/// Actions chosen by the policy for one decision
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionBuffers {
    pub continuous: Vec<f32>,
    pub discrete: Vec<usize>,
}

impl ActionBuffers {
    pub fn from_continuous(values: Vec<f32>) -> Self {
        Self {
            continuous: values,
            discrete: Vec::new(),
        }
    }

    pub fn from_discrete(values: Vec<usize>) -> Self {
        Self {
            continuous: Vec::new(),
            discrete: values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensor_appends_in_order() {
        let mut sensor = VectorSensor::default();
        sensor.add_bool(true);
        sensor.add_vec3(Vec3::new(1.0, 2.0, 3.0));
        sensor.add_observation(0.25);
        sensor.add_bool(false);
        assert_eq!(sensor.as_slice(), &[1.0, 1.0, 2.0, 3.0, 0.25, 0.0]);

        sensor.clear();
        assert!(sensor.is_empty());
    }
}
