//! Rule and report listing

use suitelint_core::Linter;

pub fn list_rules(linter: &Linter) {
    for rule in linter.list_rules() {
        println!("{}", rule);
    }
}

pub fn list_reports(linter: &Linter) {
    for report in linter.list_reports() {
        println!("{}", report);
    }
}
