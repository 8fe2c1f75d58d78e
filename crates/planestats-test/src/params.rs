//! Regression test parameters and operations

use planestats_core::Frame;

/// Regression test parameters
///
/// Tracks the state of one regression test: its name, the index of the
/// current check and every failure recorded so far. Checks keep running
/// after a failure so one run reports all mismatches.
pub struct RegParams {
    /// Name of the test (e.g., "plane_average")
    pub test_name: String,
    /// Current check index (incremented before each check)
    index: usize,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// # Arguments
    ///
    /// * `test_name` - Name of the test (e.g., "plane_minmax")
    pub fn new(test_name: &str) -> Self {
        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");

        Self {
            test_name: test_name.to_string(),
            index: 0,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current check index
    pub fn index(&self) -> usize {
        self.index
    }

    fn fail(&mut self, msg: String) -> bool {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
        false
    }

    /// Compare two floating-point values
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected value
    /// * `actual` - Actual computed value
    /// * `delta` - Maximum allowed difference
    ///
    /// # Returns
    ///
    /// `true` if values match within delta, `false` otherwise.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta || diff.is_nan() {
            let msg = format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            );
            self.fail(msg)
        } else {
            true
        }
    }

    /// Check that a frame property is absent
    pub fn check_absent(&mut self, frame: &Frame, key: &str) -> bool {
        self.index += 1;
        if frame.props().contains(key) {
            let msg = format!(
                "Failure in {}_reg: property '{}' should be absent at index {}",
                self.test_name, key, self.index
            );
            self.fail(msg)
        } else {
            true
        }
    }

    /// Compare the sample data of two frames for exact equality
    ///
    /// Properties are not compared.
    pub fn compare_frames(&mut self, expected: &Frame, actual: &Frame) -> bool {
        self.index += 1;

        if expected.format() != actual.format()
            || expected.width() != actual.width()
            || expected.height() != actual.height()
        {
            let msg = format!(
                "Failure in {}_reg: frame comparison for index {} - format mismatch",
                self.test_name, self.index
            );
            return self.fail(msg);
        }

        if !expected.same_samples(actual) {
            let msg = format!(
                "Failure in {}_reg: frame comparison for index {} - sample mismatch",
                self.test_name, self.index
            );
            return self.fail(msg);
        }

        true
    }

    /// Compare two strings for exact equality
    pub fn compare_strings(&mut self, expected: &str, actual: &str) -> bool {
        self.index += 1;

        if expected != actual {
            let msg = format!(
                "Failure in {}_reg: string comparison for index {}\n\
                 expected:\n{}\nactual:\n{}",
                self.test_name, self.index, expected, actual
            );
            self.fail(msg)
        } else {
            true
        }
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all checks passed, `false` if any failed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all checks have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planestats_core::VideoFormat;

    #[test]
    fn test_compare_values_success() {
        let mut rp = RegParams::new("test");
        assert!(rp.compare_values(100.0, 100.0, 0.0));
        assert!(rp.is_success());
        assert_eq!(rp.index(), 1);
    }

    #[test]
    fn test_compare_values_within_delta() {
        let mut rp = RegParams::new("test");
        assert!(rp.compare_values(100.0, 100.5, 1.0));
        assert!(rp.is_success());
    }

    #[test]
    fn test_compare_values_failure() {
        let mut rp = RegParams::new("test");
        assert!(!rp.compare_values(100.0, 200.0, 0.0));
        assert!(!rp.compare_values(0.0, f64::NAN, 1.0));
        assert!(!rp.is_success());
        assert_eq!(rp.failures().len(), 2);
        assert!(!rp.cleanup());
    }

    #[test]
    fn test_compare_frames() {
        let mut rp = RegParams::new("test");
        let a = Frame::new(VideoFormat::gray8(), 2, 2).unwrap();
        let mut b = a.clone();
        b.props_mut().set_int("psmMin", 0);
        assert!(rp.compare_frames(&a, &b));
        assert!(rp.check_absent(&a, "psmMin"));
        assert!(!rp.check_absent(&b, "psmMin"));

        let c = Frame::new(VideoFormat::gray16(), 2, 2).unwrap();
        assert!(!rp.compare_frames(&a, &c));
    }

    #[test]
    fn test_compare_strings() {
        let mut rp = RegParams::new("test");
        assert!(rp.compare_strings("a", "a"));
        assert!(!rp.compare_strings("a", "b"));
    }
}
