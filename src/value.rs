use std::fmt;

/// Longest string a value may hold, in characters.
pub const MAX_STRING_LEN: usize = 255;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    String(String),
    Null,
}

impl Value {
    /// Builds a string value, truncating to [`MAX_STRING_LEN`] characters.
    pub fn string(text: impl Into<String>) -> Value {
        let text = text.into();
        Value::String(truncate_chars(text, MAX_STRING_LEN))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Null => "null",
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Converts to text for concatenation and styling.
    ///
    /// `decimals` of `None` selects the compact display form: integral
    /// numbers print without a fractional part, others use `%g`.
    pub fn coerce_to_string(&self, decimals: Option<usize>) -> String {
        match self {
            Value::Number(n) => number_to_string(*n, decimals),
            Value::String(s) => s.clone(),
            Value::Null => "null".to_string(),
        }
    }

    /// Text shown for a result: numbers at the session precision.
    pub fn render(&self, decimals: usize) -> String {
        match self {
            Value::Number(n) => format!("{:.*}", decimals, n),
            Value::String(s) => s.clone(),
            Value::Null => "null".to_string(),
        }
    }

    /// String concatenation with the left operand kept whole when the
    /// result would overflow.
    pub fn concat(&self, other: &Value, decimals: usize) -> Value {
        let mut text = self.coerce_to_string(Some(decimals));
        text.push_str(&other.coerce_to_string(Some(decimals)));
        Value::string(text)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.coerce_to_string(None))
    }
}

pub fn number_to_string(n: f64, decimals: Option<usize>) -> String {
    if n.is_nan() {
        return "nan".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let magnitude = n.abs();
    if magnitude >= 1e9 || (magnitude <= 1e-9 && n != 0.0) {
        return format_general(n);
    }

    match decimals {
        Some(places) => format!("{:.*}", places, n),
        None if n == n.trunc() => (n as i64).to_string(),
        None => format_general(n),
    }
}

/// `printf("%g")`: six significant digits, scientific outside 1e-4..1e6.
pub fn format_general(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }
    if !n.is_finite() {
        return number_to_string(n, None);
    }

    let scientific = format!("{:.5e}", n);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some(parts) => parts,
        None => return scientific,
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if !(-4..6).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let places = (5 - exponent) as usize;
        trim_fraction(&format!("{:.*}", places, n)).to_string()
    }
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

pub(crate) fn truncate_chars(text: String, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => text[..cut].to_string(),
        None => text,
    }
}
