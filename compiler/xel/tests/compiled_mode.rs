//! Compiled mode seen from the embedding API: host objects, shared
//! expressions and fallback to the interpreter.

#![allow(clippy::unwrap_used, reason = "tests")]

use std::sync::{Arc, Mutex};
use std::thread;

use pretty_assertions::assert_eq;
use xel::{
    CompilerMode, Expression, ExpressionParser, HostError, HostObject, ParserConfig,
    StandardEvaluationContext, Value,
};

#[derive(Debug)]
struct Account {
    owner: Mutex<String>,
    balance: i64,
}

impl Account {
    fn new(owner: &str, balance: i64) -> Self {
        Account {
            owner: Mutex::new(owner.to_owned()),
            balance,
        }
    }
}

impl HostObject for Account {
    fn type_name(&self) -> &str {
        "Account"
    }

    fn property(&self, name: &str) -> Option<Value> {
        match name {
            "owner" => Some(Value::from(self.owner.lock().unwrap().as_str())),
            "balance" => Some(Value::Long(self.balance)),
            _ => None,
        }
    }

    fn set_property(&self, name: &str, value: Value) -> Result<bool, HostError> {
        match (name, value) {
            ("owner", Value::Str(s)) => {
                *self.owner.lock().unwrap() = s.to_string();
                Ok(true)
            }
            ("owner", _) => Err(HostError::new("owner must be a string")),
            _ => Ok(false),
        }
    }

    fn invoke(&self, method: &str, args: &[Value]) -> Option<Result<Value, HostError>> {
        match (method, args) {
            ("canWithdraw", [Value::Int(amount)]) => {
                Some(Ok(Value::Bool(i64::from(*amount) <= self.balance)))
            }
            _ => None,
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

fn immediate(source: &str) -> Expression {
    ExpressionParser::new(ParserConfig::default().with_compiler_mode(CompilerMode::Immediate))
        .parse(source)
        .unwrap()
}

fn account_context(owner: &str, balance: i64) -> StandardEvaluationContext {
    StandardEvaluationContext::new().with_root(Value::object(Account::new(owner, balance)))
}

#[test]
fn host_properties_compile() {
    let expr = immediate("balance * 2 > 100 && owner != 'bank'");
    let mut ctx = account_context("ann", 60);
    assert_eq!(expr.value(&mut ctx).unwrap(), Value::Bool(true));
    assert!(expr.is_compiled());

    let mut poorer = account_context("bo", 10);
    assert_eq!(expr.value(&mut poorer).unwrap(), Value::Bool(false));
    assert!(expr.is_compiled());
}

#[test]
fn host_methods_stay_interpreted() {
    let expr = immediate("canWithdraw(50)");
    let mut ctx = account_context("ann", 60);
    assert_eq!(expr.value(&mut ctx).unwrap(), Value::Bool(true));
    assert_eq!(expr.value(&mut ctx).unwrap(), Value::Bool(true));
    assert!(!expr.is_compiled());
}

#[test]
fn assignment_writes_through_to_the_host() {
    let expr = ExpressionParser::default().parse("owner = 'cy'").unwrap();
    let account = Value::object(Account::new("ann", 0));
    let mut ctx = StandardEvaluationContext::new().with_root(account.clone());
    assert_eq!(expr.value(&mut ctx).unwrap(), Value::from("cy"));

    let Value::Object(obj) = account else {
        unreachable!("constructed as an object");
    };
    assert_eq!(obj.property("owner"), Some(Value::from("cy")));

    let rejected = ExpressionParser::default().parse("owner = 1").unwrap();
    assert!(rejected.value(&mut ctx).is_err());
}

#[test]
fn a_different_root_type_falls_back() {
    let expr = immediate("balance + 1");
    let mut ctx = account_context("ann", 1);
    assert_eq!(expr.value(&mut ctx).unwrap(), Value::Long(2));
    assert!(expr.is_compiled());

    let mut map = xel::ValueMap::new();
    map.insert(xel::MapKey::from("balance"), Value::Double(0.5));
    let mut other = StandardEvaluationContext::new().with_root(Value::map(map));
    assert_eq!(expr.value(&mut other).unwrap(), Value::Double(1.5));
    assert_eq!(expr.failed_compilations(), 1);
}

#[test]
fn shared_expressions_evaluate_on_many_threads() {
    let expr = Arc::new(immediate("#n * #n + 1"));
    let handles: Vec<_> = (0..8)
        .map(|n| {
            let expr = Arc::clone(&expr);
            thread::spawn(move || {
                let mut ctx = StandardEvaluationContext::new();
                ctx.set_variable("n", n);
                (0..50)
                    .map(|_| expr.value(&mut ctx).unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for (n, handle) in handles.into_iter().enumerate() {
        let n = i32::try_from(n).unwrap();
        let results = handle.join().unwrap();
        assert!(results.iter().all(|v| *v == Value::Int(n * n + 1)));
    }
    assert!(expr.is_compiled());
}
