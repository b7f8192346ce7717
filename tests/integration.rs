use std::{cell::RefCell, rc::Rc, str::from_utf8};

use tiny_bank::{
    account::{AccountError, InvalidArgument, TransferPolicy},
    bank::BankConfig,
    bin_utils::Service,
    command::CommandError,
    processor::ProcessError,
};

const SCENARIO: &str = include_str!("scenario.csv");
const REJECTIONS: &str = include_str!("rejections.csv");

type Errors = Vec<(u64, ProcessError)>;

fn run(script: &str, config: BankConfig, show_history: bool) -> (Vec<String>, Errors) {
    let errors = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&errors);
    let mut output = Vec::new();
    let service = Service {
        input: script.as_bytes(),
        output: &mut output,
        config,
        show_history,
        error_printer: Box::new(move |line, err| sink.borrow_mut().push((line, err))),
    };
    service.run().unwrap();
    let lines = from_utf8(&output)
        .unwrap()
        .lines()
        .map(ToOwned::to_owned)
        .collect();
    let errors = errors.take();
    (lines, errors)
}

#[test]
fn john_and_jane() {
    let (lines, errors) = run(SCENARIO, BankConfig::default(), true);
    assert!(errors.is_empty());
    assert_eq!(
        lines,
        vec![
            "id,name,balance",
            "0,John,1000",
            "1,Jane,800",
            "",
            "id,name,type,amount,to,from",
            "0,John,Deposit,500,,",
            "0,John,Withdrawal,200,,",
            "0,John,Transfer,300,Jane,",
            "1,Jane,Received,300,,John",
        ]
    );
}

#[test]
fn history_is_optional() {
    let (lines, _) = run(SCENARIO, BankConfig::default(), false);
    assert_eq!(lines, vec!["id,name,balance", "0,John,1000", "1,Jane,800"]);
}

#[test]
fn rejected_rows_are_reported_and_skipped() {
    let (lines, errors) = run(REJECTIONS, BankConfig::default(), true);
    assert_eq!(
        lines,
        vec![
            "id,name,balance",
            "0,Alice,0",
            "1,Bob,40",
            "",
            "id,name,type,amount,to,from",
            "0,Alice,Transfer,40,Bob,",
            "0,Alice,Withdrawal,60,,",
            "1,Bob,Received,40,,Alice",
        ]
    );

    let errors: Vec<_> = errors.into_iter().map(|(_, err)| err).collect();
    assert_eq!(errors.len(), 10);
    assert!(matches!(
        errors[0],
        ProcessError::AccountErr(AccountError::InvalidArgument(InvalidArgument::BlankName))
    ));
    assert!(matches!(
        errors[1],
        ProcessError::AccountErr(AccountError::InvalidArgument(
            InvalidArgument::NegativeInitialDeposit
        ))
    ));
    assert!(matches!(
        errors[2],
        ProcessError::CommandErr(CommandError::InvalidAmount {
            source: InvalidArgument::NotANumber,
            ..
        })
    ));
    assert!(matches!(
        errors[3],
        ProcessError::CommandErr(CommandError::UnknownAccount { .. })
    ));
    assert!(matches!(
        errors[4],
        ProcessError::AccountErr(AccountError::InvalidArgument(
            InvalidArgument::NonPositiveAmount { .. }
        ))
    ));
    assert!(matches!(
        errors[5],
        ProcessError::AccountErr(AccountError::InsufficientFunds { .. })
    ));
    // full balance transfer
    assert!(matches!(
        errors[6],
        ProcessError::AccountErr(AccountError::InsufficientFunds { .. })
    ));
    assert!(matches!(
        errors[7],
        ProcessError::AccountErr(AccountError::InvalidArgument(
            InvalidArgument::MissingRecipient
        ))
    ));
    assert!(matches!(
        errors[8],
        ProcessError::AccountErr(AccountError::InvalidArgument(
            InvalidArgument::MissingRecipient
        ))
    ));
    assert!(matches!(
        errors[9],
        ProcessError::CommandErr(CommandError::MalformedRow(_))
    ));
}

#[test]
fn full_balance_transfer_when_allowed() {
    let script = "op,account,amount,recipient\n\
                  create,Alice,100,\n\
                  create,Bob,0,\n\
                  transfer,Alice,100,Bob\n";
    let config = BankConfig {
        transfer_policy: TransferPolicy::AllowFullBalance,
    };
    let (lines, errors) = run(script, config, false);
    assert!(errors.is_empty());
    assert_eq!(lines, vec!["id,name,balance", "0,Alice,0", "1,Bob,100"]);
}
