use crate::error::ChartDataError;
use serde::{Deserialize, Serialize};

/// One benchmark result: the value of test `name` measured in results file `file`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, derive_new::new)]
pub struct MeasurementRecord {
    #[new(into)]
    pub name: String,
    #[new(into)]
    pub file: String,
    pub value: f64,
}

impl MeasurementRecord {
    pub fn validate(&self) -> Result<(), ChartDataError> {
        if !self.value.is_finite() {
            return Err(ChartDataError::NonFiniteValue {
                name: self.name.clone(),
                file: self.file.clone(),
                value: self.value,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_finite_value() {
        let record = MeasurementRecord::new("insert", "run1.json", 0.25);
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_nan() {
        let record = MeasurementRecord::new("insert", "run1.json", f64::NAN);
        let err = record.validate().unwrap_err();
        assert!(matches!(
            err,
            ChartDataError::NonFiniteValue { ref name, ref file, .. }
                if name == "insert" && file == "run1.json"
        ));
    }

    #[test]
    fn test_validate_rejects_infinity() {
        let record = MeasurementRecord::new("insert", "run1.json", f64::INFINITY);
        assert!(record.validate().is_err());
    }
}
