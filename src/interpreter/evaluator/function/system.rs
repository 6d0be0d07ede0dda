use std::{env, fs, path::Path};

use log::info;

use crate::interpreter::{
    evaluator::{
        core::{Context, EvalResult},
        utils::{expect_str, io_error},
    },
    value::core::Value,
};

/// `ls()` or `ls(dir)`: the names of the entries of a directory, sorted.
///
/// Without an argument (or with `null`) the current directory is listed.
///
/// # Errors
/// `Io` if the directory cannot be read, `TypeError` for a non-string path.
pub fn ls(_: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    let dir = match args.first() {
        None | Some(Value::Null) => ".",
        Some(_) => expect_str(args, 0, "ls", line)?,
    };

    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| io_error("ls", &e, line))? {
        let entry = entry.map_err(|e| io_error("ls", &e, line))?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();
    Ok(Value::from(names.into_iter().map(Value::Str).collect::<Vec<_>>()))
}

/// `cd(dir)`: changes the process working directory. Returns `null`.
///
/// # Errors
/// `Io` if the directory cannot be entered.
pub fn cd(_: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    let dir = expect_str(args, 0, "cd", line)?;
    env::set_current_dir(Path::new(dir)).map_err(|e| io_error("cd", &e, line))?;
    info!("changed directory to {dir}");
    Ok(Value::Null)
}

/// `pwd()`: the current working directory as a string.
pub fn pwd(_: &mut Context, _: &[Value], line: usize) -> EvalResult<Value> {
    let dir = env::current_dir().map_err(|e| io_error("pwd", &e, line))?;
    Ok(Value::Str(dir.to_string_lossy().into_owned()))
}
