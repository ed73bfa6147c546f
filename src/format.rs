/// Fixed two-decimal rendering used for every figure shown to the user
pub fn fixed(n: f64) -> String {
    format!("{:.2}", n)
}

/// `value` followed by `unit`, if there is one
pub fn with_unit(value: &str, unit: &str) -> String {
    if unit.is_empty() {
        value.to_owned()
    } else {
        format!("{} {}", value, unit)
    }
}

/// A confidence level as a percentage: `0.9` becomes `90%`, `0.975` becomes `97.5%`
pub fn level(confidence_level: f64) -> String {
    format!("{}%", trimmed(confidence_level * 1e2, 4))
}

/// `n` with at most `decimals` decimals and no trailing zeros: `2.0` becomes `2`
pub fn trimmed(n: f64, decimals: usize) -> String {
    let s = format!("{:.*}", decimals, n);
    if s.contains('.') {
        let s = s.trim_end_matches('0').trim_end_matches('.');
        if s == "-0" {
            String::from("0")
        } else {
            s.to_owned()
        }
    } else {
        s
    }
}

pub fn short(n: f64) -> String {
    let n_abs = n.abs();

    if n_abs < 10.0 {
        format!("{:.4}", n)
    } else if n_abs < 100.0 {
        format!("{:.3}", n)
    } else if n_abs < 1000.0 {
        format!("{:.2}", n)
    } else if n_abs < 10000.0 {
        format!("{:.1}", n)
    } else {
        format!("{:.0}", n)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn levels() {
        assert_eq!(level(0.9), "90%");
        assert_eq!(level(0.95), "95%");
        assert_eq!(level(0.975), "97.5%");
        assert_eq!(level(0.999_99), "99.999%");
    }

    #[test]
    fn trimmed_values() {
        assert_eq!(trimmed(2.0, 4), "2");
        assert_eq!(trimmed(2.5, 4), "2.5");
        assert_eq!(trimmed(-0.000_01, 4), "0");
        assert_eq!(trimmed(120., 0), "120");
    }

    #[test]
    fn short_keeps_four_significant_digits() {
        assert_eq!(short(1.581_138), "1.5811");
        assert_eq!(short(-21.318_467), "-21.318");
        assert_eq!(short(12_345.6), "12346");
    }

    #[test]
    fn units() {
        assert_eq!(with_unit(&fixed(3.), "hours"), "3.00 hours");
        assert_eq!(with_unit(&fixed(3.), ""), "3.00");
    }
}
