use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

mod common;

#[test]
fn test_malformed_csv_handling() {
    let file = common::command_file(&[
        "create, loan-1, borrower-1, 5000000,",
        // Unknown command type
        "refund, loan-1, , 110000, 1",
        // Amount is not a number
        "pay, loan-1, , not_a_number, 1",
        // Week cannot be negative
        "pay, loan-1, , 110000, -1",
        // Missing week for an explicit payment
        "pay, loan-1, , 110000,",
        // Valid payment still applies after the bad rows
        "pay, loan-1, , 110000, 1",
    ]);

    let mut cmd = Command::new(cargo_bin!("billing-engine"));
    cmd.arg(file.path());

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Error reading command"))
        .stderr(predicate::str::contains("is missing week"))
        .stdout(predicate::str::contains(
            "loan-1,borrower-1,5000000,5500000,110000,5390000,1,2,1,false,false",
        ));
}

#[test]
fn test_oversized_and_negative_principals_are_skipped() {
    let file = common::command_file(&[
        "create, loan-1, borrower-1, 5000000,",
        // Principal plus interest does not fit in a Decimal
        "create, loan-big, borrower-2, 75000000000000000000000000000,",
        "create, loan-neg, borrower-3, -5000000,",
        "pay, loan-1, , 110000, 1",
    ]);

    let mut cmd = Command::new(cargo_bin!("billing-engine"));
    cmd.arg(file.path());

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("cannot be spread over 50 weeks"))
        .stderr(predicate::str::contains("cannot be negative"))
        .stdout(predicate::str::contains(
            "loan-1,borrower-1,5000000,5500000,110000,5390000,1,2,1,false,false",
        ))
        .stdout(predicate::str::contains("loan-big").not())
        .stdout(predicate::str::contains("loan-neg").not());
}

#[test]
fn test_fractional_principal() {
    let file = common::command_file(&[
        "create, loan-1, borrower-1, 1234.5,",
        "pay_next, loan-1, , 27.159,",
    ]);

    let mut cmd = Command::new(cargo_bin!("billing-engine"));
    cmd.arg(file.path());

    // 1234.5 * 1.1 = 1357.95, split over 50 weeks = 27.159
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "loan-1,borrower-1,1234.5,1357.95,27.159,1330.791,1,2,1,false,false",
        ));
}

#[test]
fn test_missing_input_file() {
    let mut cmd = Command::new(cargo_bin!("billing-engine"));
    cmd.arg("tests/fixtures/does_not_exist.csv");

    cmd.assert().failure();
}
