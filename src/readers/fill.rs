/// Sentinel used by a data source for "no measurement" and the value that
/// replaces it on load.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillValue {
    pub sentinel: f64,
    pub replacement: f64,
}

impl FillValue {
    /// TIMED/SEE archives mark missing flux with -1.
    pub const SEE: FillValue = FillValue::new(-1.0);
    /// OMNI2 daily tables mark missing F10.7 with 999.9.
    pub const OMNI_F107: FillValue = FillValue::new(999.9);
    pub const OMNI_SUNSPOT: FillValue = FillValue::new(999.0);
    pub const OMNI_LYMAN_ALPHA: FillValue = FillValue::new(0.999999);

    /// Replaces `sentinel` with NaN.
    pub const fn new(sentinel: f64) -> Self {
        Self {
            sentinel,
            replacement: f64::NAN,
        }
    }

    pub fn apply(&self, value: f64) -> f64 {
        if value == self.sentinel {
            self.replacement
        } else {
            value
        }
    }

    pub fn replace_fill(&self, values: &mut [f64]) {
        for value in values.iter_mut() {
            *value = self.apply(*value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_fill() {
        let mut values = vec![1.0, -1.0, 3.0, -1.5];
        FillValue::SEE.replace_fill(&mut values);

        assert_eq!(values[0], 1.0);
        assert!(values[1].is_nan());
        assert_eq!(values[3], -1.5);
    }

    #[test]
    fn test_custom_replacement() {
        let fill = FillValue {
            sentinel: 999.9,
            replacement: 0.0,
        };
        assert_eq!(fill.apply(999.9), 0.0);
        assert_eq!(fill.apply(150.0), 150.0);
    }
}
