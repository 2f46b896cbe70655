//! Built-in checkers.

mod lengths;
mod parsing;
mod spacing;

pub use lengths::LengthChecker;
pub use parsing::ParsingErrorChecker;
pub use spacing::SpacingChecker;

use crate::checker::Checker;

/// Every built-in checker, in registration order.
pub fn builtin() -> Vec<Box<dyn Checker>> {
    vec![
        Box::new(ParsingErrorChecker::new()),
        Box::new(LengthChecker::new()),
        Box::new(SpacingChecker::new()),
    ]
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LinterConfig;
    use crate::registry::Registry;

    #[test]
    fn test_builtin_checkers_register_without_conflicts() {
        let config = LinterConfig::new();
        let mut registry = Registry::new();
        for checker in builtin() {
            registry.register_checker(checker, &config).unwrap();
        }
        assert_eq!(registry.len(), 3);
        assert!(registry.parse_validity_checker().is_some());
    }
}
