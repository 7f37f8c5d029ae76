//! Tests for locating definitions in parsed files

use super::*;
use crate::python::locate::find_definition;
use crate::python::utils::definition_name;
use carron_core::{ParsedTarget, TargetRef};

const SOURCE: &str = r#"
import functools

def first(x):
    return 1

def first(x, y):
    return 2

@functools.lru_cache
async def cached():
    pass

class Greeter:
    greeting = "hi"

    def greet(self, name):
        return name

    @staticmethod
    def shout(text):
        return text.upper()

class Greeter:
    def later(self):
        pass
"#;

fn target(raw: &str) -> ParsedTarget {
    ParsedTarget::parse(&TargetRef::from(raw), &["py"]).unwrap()
}

fn locate(raw: &str) -> Result<(String, usize), String> {
    let parsed = parse(SOURCE);
    find_definition(parsed.root(), &target(raw), parsed.source())
        .map(|node| {
            (
                definition_name(node, parsed.source())
                    .unwrap_or_default()
                    .to_string(),
                node.start_position().row + 1,
            )
        })
        .map_err(|e| e.to_string())
}

#[test]
fn test_first_function_match_wins() {
    assert_eq!(locate("m.py:first"), Ok(("first".to_string(), 4)));
}

#[test]
fn test_decorated_async_function() {
    assert_eq!(locate("m.py:cached"), Ok(("cached".to_string(), 11)));
}

#[test]
fn test_method_in_class() {
    assert_eq!(locate("m.py:Greeter.greet"), Ok(("greet".to_string(), 17)));
    assert_eq!(locate("m.py:Greeter.shout"), Ok(("shout".to_string(), 21)));
}

#[test]
fn test_method_searched_in_first_class_only() {
    assert_eq!(
        locate("m.py:Greeter.later"),
        Err("Method 'Greeter.later' not found".to_string())
    );
}

#[test]
fn test_class_attribute_is_not_a_method() {
    assert_eq!(
        locate("m.py:Greeter.greeting"),
        Err("Method 'Greeter.greeting' not found".to_string())
    );
}

#[test]
fn test_missing_class_and_function() {
    assert_eq!(
        locate("m.py:Missing.greet"),
        Err("Class 'Missing' not found".to_string())
    );
    assert_eq!(
        locate("m.py:missing"),
        Err("Function 'missing' not found".to_string())
    );
}

#[test]
fn test_class_is_not_a_function() {
    assert_eq!(
        locate("m.py:Greeter"),
        Err("Function 'Greeter' not found".to_string())
    );
}
