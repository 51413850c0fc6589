use super::{Type, Value};

impl Value {
    /// Applies one step of the coercion ladder to make `self` fit `ty`.
    ///
    /// - a numeric value is narrowed or widened to the numeric target
    ///   (`F64`, `F32`, `I64`, `I32`, `I16`, `I8`); integer targets reject
    ///   out-of-range values and floats are truncated toward zero
    /// - a timestamp is reduced to its date when the target is `Date`
    ///
    /// Returns `None` when no step applies. Null coerces to itself.
    pub fn coerce(&self, ty: Type) -> Option<Value> {
        if self.is_null() {
            return Some(Value::Null);
        }

        if self.is_a(ty) {
            return Some(self.clone());
        }

        match self {
            Value::Timestamp(ts) if ty == Type::Date => Some(Value::Date(ts.date())),
            _ if self.is_numeric() && ty.is_numeric() => self.narrow_to(ty),
            _ => None,
        }
    }

    fn narrow_to(&self, ty: Type) -> Option<Value> {
        match ty {
            Type::F64 => self.as_f64().map(Value::F64),
            Type::F32 => self.as_f64().map(|v| Value::F32(v as f32)),
            Type::I64 => self.as_integral().map(Value::I64),
            Type::I32 => self
                .as_integral()
                .and_then(|v| i32::try_from(v).ok())
                .map(Value::I32),
            Type::I16 => self
                .as_integral()
                .and_then(|v| i16::try_from(v).ok())
                .map(Value::I16),
            Type::I8 => self
                .as_integral()
                .and_then(|v| i8::try_from(v).ok())
                .map(Value::I8),
            _ => None,
        }
    }

    /// The value as an `i64`, truncating floats. Non-finite or out-of-range
    /// floats yield `None`.
    fn as_integral(&self) -> Option<i64> {
        match *self {
            Value::F32(v) => float_to_i64(v as f64),
            Value::F64(v) => float_to_i64(v),
            _ => self.as_i64(),
        }
    }
}

fn float_to_i64(v: f64) -> Option<i64> {
    let v = v.trunc();
    (v.is_finite() && v >= i64::MIN as f64 && v < i64::MAX as f64).then_some(v as i64)
}
