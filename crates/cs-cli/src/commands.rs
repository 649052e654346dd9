use std::fs;
use std::path::Path;
use std::sync::Arc;

use cs_bytecode::{disassemble, Script};
use cs_core::CmdScriptError;
use cs_dialect::{Dialect, DialectDefinition, DialectRegistry};
use cs_serial::ScriptSerializer;

use crate::{
    map_cli_export_encode, map_cli_export_write, ConvertArgs, DescribeArgs, ExportDialectArgs,
    InspectArgs, RetargetArgs,
};

pub(crate) fn run_dialects(registry: &DialectRegistry) -> Result<i32, CmdScriptError> {
    println!("RESULT:OK");
    for dialect in registry.iter() {
        println!("DIALECT:{}:{}", dialect.name(), dialect.count());
    }
    Ok(0)
}

pub(crate) fn run_describe(
    registry: &DialectRegistry,
    args: DescribeArgs,
) -> Result<i32, CmdScriptError> {
    let dialect = require_dialect(registry, &args.dialect)?;
    println!("RESULT:OK");
    println!("DIALECT:{}:{}", dialect.name(), dialect.count());
    for (index, command) in dialect.commands().iter().enumerate() {
        let args = command
            .args()
            .iter()
            .map(|arg| arg.name())
            .collect::<Vec<_>>()
            .join(",");
        println!(
            "COMMAND:{}|{}|{}|{}|{}",
            index,
            command.key(),
            command.kind().name(),
            args,
            command.returns().map(|value| value.name()).unwrap_or("-")
        );
    }
    Ok(0)
}

pub(crate) fn run_export_dialect(
    registry: &DialectRegistry,
    args: ExportDialectArgs,
) -> Result<i32, CmdScriptError> {
    let dialect = require_dialect(registry, &args.dialect)?;
    let definition = DialectDefinition::from(&*dialect);
    let payload = serde_json::to_string_pretty(&definition).map_err(map_cli_export_encode)?;
    let out = Path::new(&args.out);
    if let Some(parent) = out.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(map_cli_export_write)?;
    }
    fs::write(out, payload).map_err(map_cli_export_write)?;

    println!("RESULT:OK");
    println!("DIALECT:{}:{}", dialect.name(), dialect.count());
    println!("OUT:{}", args.out);
    Ok(0)
}

pub(crate) fn run_inspect(
    serializer: &ScriptSerializer,
    args: InspectArgs,
) -> Result<i32, CmdScriptError> {
    let script = load_input(serializer, &args.input)?;
    let dialect = script.resolve_dialect(serializer.registry())?;
    emit_script(&script, &dialect);
    for line in disassemble(&script, &dialect).lines() {
        println!("OP:{}", line);
    }
    Ok(0)
}

pub(crate) fn run_retarget(
    serializer: &ScriptSerializer,
    args: RetargetArgs,
) -> Result<i32, CmdScriptError> {
    let script = load_input(serializer, &args.input)?;
    let moved = serializer.retarget(&script, &args.dialect)?;
    serializer.save_to_path(&moved, Path::new(&args.out), args.format)?;

    let dialect = moved.resolve_dialect(serializer.registry())?;
    emit_script(&moved, &dialect);
    println!("FORMAT:{}", args.format);
    println!("OUT:{}", args.out);
    Ok(0)
}

pub(crate) fn run_convert(
    serializer: &ScriptSerializer,
    args: ConvertArgs,
) -> Result<i32, CmdScriptError> {
    let script = load_input(serializer, &args.input)?;
    serializer.save_to_path(&script, Path::new(&args.out), args.format)?;

    let dialect = script.resolve_dialect(serializer.registry())?;
    emit_script(&script, &dialect);
    println!("FORMAT:{}", args.format);
    println!("OUT:{}", args.out);
    Ok(0)
}

fn load_input(serializer: &ScriptSerializer, input: &str) -> Result<Script, CmdScriptError> {
    let path = Path::new(input);
    if !path.exists() {
        return Err(CmdScriptError::new(
            "CLI_INPUT_NOT_FOUND",
            format!("Script file does not exist: {}", path.display()),
        ));
    }
    Ok(serializer.load_from_path(path)?)
}

fn require_dialect(registry: &DialectRegistry, name: &str) -> Result<Arc<Dialect>, CmdScriptError> {
    registry.lookup(name).ok_or_else(|| {
        CmdScriptError::new(
            "CLI_DIALECT_NOT_FOUND",
            format!(
                "Dialect \"{}\" is not registered. Known dialects: {}.",
                name,
                registry.names().collect::<Vec<_>>().join(", ")
            ),
        )
    })
}

fn emit_script(script: &Script, dialect: &Dialect) {
    println!("RESULT:OK");
    println!("DIALECT:{}:{}", dialect.name(), dialect.count());
    println!(
        "FILENAME_JSON:{}",
        serde_json::to_string(script.filename()).expect("string json")
    );
    println!("OPS:{}", script.len());
    println!("CONSTS:{}", script.consts().len());
    if let Some(classifier) = script.classifier() {
        println!(
            "CLASSIFIER:{} {} {} {}",
            classifier.family, classifier.genus, classifier.species, classifier.event
        );
    }
    if let Some(source) = script.source() {
        println!(
            "SOURCE_JSON:{}",
            serde_json::to_string(source).expect("string json")
        );
    }
}
