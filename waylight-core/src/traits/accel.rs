//! Accelerometer collaborator

use crate::orientation::AccelSample;

/// Source of accelerometer samples
pub trait AccelerometerSource {
    /// Read one sample, or `None` when the sensor did not answer
    fn sample(&self) -> Option<AccelSample>;
}
