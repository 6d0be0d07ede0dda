use std::path::Path;

use log::info;

use crate::{
    ast::StyleProperty,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            utils::{expect_str, io_error},
        },
        value::core::Value,
    },
};

/// `renderHTML(component, title)`: renders a structural value into a full
/// document and returns it as a string.
pub fn render_html(ctx: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    let title = expect_str(args, 1, "renderHTML", line)?;
    Ok(Value::Str(ctx.presenter().generate_html(&args[0], title)))
}

/// `saveHTML(component, filename, title)`: renders like `renderHTML` and
/// writes the document to `filename`. Returns `null`.
///
/// # Errors
/// `Io` if the file cannot be written.
pub fn save_html(ctx: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    let filename = expect_str(args, 1, "saveHTML", line)?;
    let title = expect_str(args, 2, "saveHTML", line)?;

    let page = ctx.presenter().generate_html(&args[0], title);
    ctx.presenter()
       .save_to_file(&page, Path::new(filename))
       .map_err(|e| io_error("saveHTML", &e, line))?;
    info!("saveHTML wrote {filename}");
    Ok(Value::Null)
}

/// `addStyle(selector, properties)`: registers a style rule from a record of
/// property names to values. Returns `null`.
///
/// # Errors
/// `TypeError` if the selector is not a string or the properties are not a
/// record.
pub fn add_style(ctx: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    let selector = expect_str(args, 0, "addStyle", line)?;
    let Value::Record(record) = &args[1] else {
        return Err(RuntimeError::type_error(format!("addStyle expects a record of properties, got {}",
                                                    args[1].kind_name()),
                                            line));
    };

    let properties = record.iter()
                           .map(|(name, value)| StyleProperty { name:  name.clone(),
                                                                value: value.to_native_string(), })
                           .collect::<Vec<_>>();
    ctx.presenter().add_style(selector, &properties);
    Ok(Value::Null)
}
