use crate::interpreter::value::core::{Record, Value};

/// Builds the structural value `{ type, props }` for an element constructor.
///
/// The props argument is taken as given; a call without arguments gets an
/// empty record.
///
/// # Example
/// ```
/// use nixi::{interpreter::value::core::Value, evaluate_source};
///
/// let v = evaluate_source(r#"div { class: "card" }"#, "<doc>").unwrap();
/// assert_eq!(v.to_string(), r#"{ type = "div", props = { class = "card" } }"#);
/// ```
#[must_use]
pub fn build(kind: &str, args: &[Value]) -> Value {
    let props = args.first()
                    .cloned()
                    .unwrap_or_else(|| Value::from(Record::new()));
    Value::element(kind, props)
}
