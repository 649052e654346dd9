use cs_core::CmdScriptError;
use std::fmt::Display;

fn map_error(code: &'static str, error: impl Display) -> CmdScriptError {
    CmdScriptError::new(code, error.to_string())
}

pub(crate) fn emit_error(error: CmdScriptError) -> i32 {
    println!("RESULT:ERROR");
    println!("ERROR_CODE:{}", error.code);
    println!(
        "ERROR_MSG_JSON:{}",
        serde_json::to_string(&error.message).expect("string json")
    );
    1
}

pub(crate) fn map_cli_path(error: std::io::Error) -> CmdScriptError {
    map_error("CLI_PATH", error)
}

pub(crate) fn map_cli_dialect_scan(error: walkdir::Error) -> CmdScriptError {
    map_error("CLI_DIALECT_SCAN", error)
}

pub(crate) fn map_cli_export_write(error: std::io::Error) -> CmdScriptError {
    map_error("CLI_EXPORT_WRITE", error)
}

pub(crate) fn map_cli_export_encode(error: serde_json::Error) -> CmdScriptError {
    map_error("CLI_EXPORT_ENCODE", error)
}
