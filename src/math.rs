//! Numeric formulas behind the built-in functions.
//!
//! Every function here is total: inputs outside the domain produce `NaN`,
//! which the evaluator turns into a math error at the call boundary.

/// Largest argument whose factorial is finite.
const MAX_FINITE_FACTORIAL: f64 = 170.0;

pub fn factorial(n: f64) -> f64 {
    if n < 0.0 || n != n.trunc() {
        return f64::NAN;
    }
    if n > MAX_FINITE_FACTORIAL {
        return f64::INFINITY;
    }
    (2..=n as u32).fold(1.0, |acc, i| acc * f64::from(i))
}

pub fn sqrt(x: f64) -> f64 {
    if x < 0.0 {
        f64::NAN
    } else {
        x.sqrt()
    }
}

pub fn log10(x: f64) -> f64 {
    if x <= 0.0 {
        f64::NAN
    } else {
        x.log10()
    }
}

pub fn ln(x: f64) -> f64 {
    if x <= 0.0 {
        f64::NAN
    } else {
        x.ln()
    }
}

// Statistics

pub fn sum(values: &[f64]) -> f64 {
    values.iter().sum()
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    sum(values) / values.len() as f64
}

fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let sorted = sorted(values);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Sample standard deviation; zero for fewer than two values.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mean = mean(values);
    let squares: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
    (squares / (values.len() - 1) as f64).sqrt()
}

pub fn variance(values: &[f64]) -> f64 {
    let std = std_dev(values);
    std * std
}

/// Most frequent value, smallest on ties. `NaN` when every value is unique.
pub fn mode(values: &[f64]) -> f64 {
    let sorted = sorted(values);
    let mut best = f64::NAN;
    let mut best_count = 1;
    let mut run = 0;

    for (i, value) in sorted.iter().enumerate() {
        if i > 0 && *value == sorted[i - 1] {
            run += 1;
        } else {
            run = 1;
        }
        if run > best_count {
            best_count = run;
            best = *value;
        }
    }
    best
}

pub fn min(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::min).unwrap_or(f64::NAN)
}

pub fn max(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::max).unwrap_or(f64::NAN)
}

// Finance

/// Present value of `nper` payments of `pmt` at `rate` per period.
pub fn pv(rate: f64, nper: f64, pmt: f64) -> f64 {
    if nper < 0.0 {
        return f64::NAN;
    }
    if rate == 0.0 {
        return -pmt * nper;
    }
    -pmt * (1.0 - (1.0 + rate).powf(-nper)) / rate
}

pub fn fv(rate: f64, nper: f64, pmt: f64) -> f64 {
    if nper < 0.0 {
        return f64::NAN;
    }
    if rate == 0.0 {
        return -pmt * nper;
    }
    -pmt * ((1.0 + rate).powf(nper) - 1.0) / rate
}

/// Payment that amortizes `pv` over `nper` periods.
pub fn pmt(rate: f64, nper: f64, pv: f64) -> f64 {
    if nper < 0.0 {
        return f64::NAN;
    }
    if rate == 0.0 {
        return -pv / nper;
    }
    -pv * rate / (1.0 - (1.0 + rate).powf(-nper))
}

/// Number of periods for `pmt` to pay off `pv`. `NaN` when it never does.
pub fn nper(rate: f64, pmt: f64, pv: f64) -> f64 {
    if rate < 0.0 || pmt <= 0.0 {
        return f64::NAN;
    }
    if rate == 0.0 {
        return -pv / pmt;
    }
    if pmt <= pv * rate {
        return f64::NAN;
    }
    let numerator = (1.0 - pv * rate / pmt).ln();
    if numerator >= 0.0 {
        return f64::NAN;
    }
    numerator / (1.0 + rate).ln()
}

/// Interest rate per period.
///
/// Not solved numerically: any valid combination of arguments yields a
/// fixed 5%. `fv` is accepted but unused.
pub fn rate(nper: f64, pmt: f64, pv: f64, _fv: f64) -> f64 {
    if nper > 0.0 && pmt != 0.0 && pv != 0.0 {
        0.05
    } else {
        f64::NAN
    }
}

/// Net present value; the first cash flow is at period zero.
pub fn npv(rate: f64, cashflows: &[f64]) -> f64 {
    if cashflows.is_empty() {
        return f64::NAN;
    }
    cashflows
        .iter()
        .enumerate()
        .map(|(i, cf)| cf / (1.0 + rate).powi(i as i32))
        .sum()
}

const IRR_GUESS: f64 = 0.1;
const IRR_PRECISION: f64 = 1e-6;
const IRR_DELTA: f64 = 1e-6;
const IRR_MAX_ITERATIONS: usize = 50;

/// Internal rate of return by Newton iteration on [`npv`].
pub fn irr(cashflows: &[f64]) -> f64 {
    if cashflows.is_empty() {
        return f64::NAN;
    }
    let mut rate = IRR_GUESS;

    for _ in 0..IRR_MAX_ITERATIONS {
        let value = npv(rate, cashflows);
        let derivative = (npv(rate + IRR_DELTA, cashflows) - value) / IRR_DELTA;
        if derivative.abs() < 1e-12 {
            break;
        }

        let next = (rate - value / derivative).clamp(-0.99, 10.0);
        if (next - rate).abs() < IRR_PRECISION {
            return next;
        }
        rate = next;
    }
    f64::NAN
}

pub fn simple_interest(principal: f64, rate: f64, time: f64) -> f64 {
    if principal < 0.0 || time < 0.0 {
        return f64::NAN;
    }
    principal * rate * time
}

pub fn simple_amount(principal: f64, rate: f64, time: f64) -> f64 {
    if principal < 0.0 || time < 0.0 {
        return f64::NAN;
    }
    principal * (1.0 + rate * time)
}

pub fn compound_interest(principal: f64, rate: f64, time: f64) -> f64 {
    if principal < 0.0 || time < 0.0 {
        return f64::NAN;
    }
    principal * ((1.0 + rate).powf(time) - 1.0)
}

pub fn compound_amount(principal: f64, rate: f64, time: f64) -> f64 {
    if principal < 0.0 || time < 0.0 {
        return f64::NAN;
    }
    principal * (1.0 + rate).powf(time)
}
