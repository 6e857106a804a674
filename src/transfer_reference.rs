use std::cell::RefCell;

use crate::constants::*;
use crate::types::*;

/// Generates the audit reference attached to each transfer request, unique
/// per process run: `SALDO:<UTC timestamp>:<sequence>`.
#[derive(Debug)]
pub struct TransferReferenceGenerator {
    prefix: String,
    next_number: RefCell<i32>,
}

impl TransferReferenceGenerator {
    pub fn new() -> TransferReferenceGenerator {
        TransferReferenceGenerator {
            prefix: format!(
                "{}:{}",
                TRANSFER_REFERENCE_PREFIX,
                chrono::Utc::now().format("%Y%m%d:%H%M%S%3f")
            ),
            next_number: RefCell::new(0),
        }
    }

    pub fn next_reference(&self) -> TransferReference {
        let mut next_number = self.next_number.borrow_mut();
        let result = format!("{}:{}", self.prefix, next_number);
        *next_number += 1;
        TransferReference(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_references_are_distinct_and_prefixed() {
        let generator = TransferReferenceGenerator::new();
        let first = generator.next_reference();
        let second = generator.next_reference();
        assert_ne!(first, second);
        assert!(first.0.starts_with(TRANSFER_REFERENCE_PREFIX));
        assert!(first.0.ends_with(":0"));
        assert!(second.0.ends_with(":1"));
    }
}
