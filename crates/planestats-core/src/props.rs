//! Frame property maps
//!
//! [`PropMap`] is the named-value store attached to every frame. The same
//! type carries filter arguments, so a filter can be configured from the
//! argument map a host hands over.
//!
//! Every key holds one typed array: integers, floats or a byte blob.
//! Setting a key replaces whatever was stored under it before. Keys keep
//! their insertion order.

use crate::error::{Error, Result};
use std::fmt;

/// Value stored under one property key
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    /// Integer array
    Int(Vec<i64>),
    /// Float array
    Float(Vec<f64>),
    /// Opaque bytes (typically UTF-8 text)
    Data(Vec<u8>),
}

impl PropValue {
    /// Number of elements (byte blobs count as one element).
    pub fn num_elements(&self) -> usize {
        match self {
            PropValue::Int(v) => v.len(),
            PropValue::Float(v) => v.len(),
            PropValue::Data(_) => 1,
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            PropValue::Int(_) => "int",
            PropValue::Float(_) => "float",
            PropValue::Data(_) => "data",
        }
    }
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
            if items.len() == 1 {
                return write!(f, "{}", items[0]);
            }
            write!(f, "[")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{item}")?;
            }
            write!(f, "]")
        }

        match self {
            PropValue::Int(v) => list(f, v.as_slice()),
            PropValue::Float(v) => list(f, v.as_slice()),
            PropValue::Data(d) => write!(f, "{:?}", String::from_utf8_lossy(d)),
        }
    }
}

/// Ordered property map
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropMap {
    entries: Vec<(String, PropValue)>,
}

impl PropMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.position(key).map(|i| &self.entries[i].1)
    }

    /// Store `value` under `key`, replacing any previous value.
    pub fn set(&mut self, key: &str, value: PropValue) {
        match self.position(key) {
            Some(i) => self.entries[i].1 = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    pub fn set_int(&mut self, key: &str, value: i64) {
        self.set(key, PropValue::Int(vec![value]));
    }

    pub fn set_int_array(&mut self, key: &str, values: &[i64]) {
        self.set(key, PropValue::Int(values.to_vec()));
    }

    pub fn set_float(&mut self, key: &str, value: f64) {
        self.set(key, PropValue::Float(vec![value]));
    }

    pub fn set_data(&mut self, key: &str, value: &[u8]) {
        self.set(key, PropValue::Data(value.to_vec()));
    }

    /// Append an integer to the array under `key`, creating it if absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PropType`] if `key` holds a non-integer value.
    pub fn append_int(&mut self, key: &str, value: i64) -> Result<()> {
        match self.position(key) {
            Some(i) => match &mut self.entries[i].1 {
                PropValue::Int(v) => {
                    v.push(value);
                    Ok(())
                }
                _ => Err(Error::PropType {
                    key: key.to_string(),
                    expected: "int",
                }),
            },
            None => {
                self.set_int(key, value);
                Ok(())
            }
        }
    }

    /// Append a float to the array under `key`, creating it if absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PropType`] if `key` holds a non-float value.
    pub fn append_float(&mut self, key: &str, value: f64) -> Result<()> {
        match self.position(key) {
            Some(i) => match &mut self.entries[i].1 {
                PropValue::Float(v) => {
                    v.push(value);
                    Ok(())
                }
                _ => Err(Error::PropType {
                    key: key.to_string(),
                    expected: "float",
                }),
            },
            None => {
                self.set_float(key, value);
                Ok(())
            }
        }
    }

    /// Remove `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<PropValue> {
        self.position(key).map(|i| self.entries.remove(i).1)
    }

    /// Number of elements under `key`, 0 if absent.
    pub fn num_elements(&self, key: &str) -> usize {
        self.get(key).map_or(0, PropValue::num_elements)
    }

    /// Read one integer.
    ///
    /// # Errors
    ///
    /// - [`Error::PropMissing`] if `key` is absent
    /// - [`Error::PropType`] if it is not an integer array
    /// - [`Error::IndexOutOfBounds`] if `index` is past the end
    pub fn get_int(&self, key: &str, index: usize) -> Result<i64> {
        match self.lookup(key)? {
            PropValue::Int(v) => element(v, index),
            _ => Err(Error::PropType {
                key: key.to_string(),
                expected: "int",
            }),
        }
    }

    /// Read one integer clamped to the `i32` range.
    pub fn get_int_saturated(&self, key: &str, index: usize) -> Result<i32> {
        let value = self.get_int(key, index)?;
        Ok(value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
    }

    /// Read the whole integer array under `key`.
    pub fn get_int_array(&self, key: &str) -> Result<&[i64]> {
        match self.lookup(key)? {
            PropValue::Int(v) => Ok(v),
            _ => Err(Error::PropType {
                key: key.to_string(),
                expected: "int",
            }),
        }
    }

    /// Read one float. Integer values are widened.
    pub fn get_float(&self, key: &str, index: usize) -> Result<f64> {
        match self.lookup(key)? {
            PropValue::Float(v) => element(v, index),
            PropValue::Int(v) => element(v, index).map(|i| i as f64),
            _ => Err(Error::PropType {
                key: key.to_string(),
                expected: "float",
            }),
        }
    }

    /// Read one float clamped to the `f32` range.
    pub fn get_float_saturated(&self, key: &str, index: usize) -> Result<f32> {
        let value = self.get_float(key, index)?;
        if value.is_nan() {
            return Ok(f32::NAN);
        }
        Ok(value.clamp(f64::from(f32::MIN), f64::from(f32::MAX)) as f32)
    }

    /// Read a byte blob.
    pub fn get_data(&self, key: &str) -> Result<&[u8]> {
        match self.lookup(key)? {
            PropValue::Data(d) => Ok(d),
            _ => Err(Error::PropType {
                key: key.to_string(),
                expected: "data",
            }),
        }
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    fn lookup(&self, key: &str) -> Result<&PropValue> {
        self.get(key)
            .ok_or_else(|| Error::PropMissing(key.to_string()))
    }
}

fn element<T: Copy>(values: &[T], index: usize) -> Result<T> {
    values.get(index).copied().ok_or(Error::IndexOutOfBounds {
        index,
        len: values.len(),
    })
}

impl fmt::Display for PropMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.entries {
            writeln!(f, "{key}: {value} ({})", value.type_name())?;
        }
        Ok(())
    }
}
