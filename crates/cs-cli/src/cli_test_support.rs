use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use cs_bytecode::{Script, ScriptBuilder};
use cs_core::{ConstValue, TokenTrace};
use cs_dialect::DialectRegistry;
use cs_serial::{Encoding, ScriptSerializer};

pub(crate) const TEST1_DEFINITION: &str = r#"{
  "name": "Test1",
  "commands": [
    { "key": "dde" },
    { "key": "doif", "args": ["condition"] },
    { "key": "endi" }
  ]
}"#;

pub(crate) fn temp_path(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time should be monotonic")
        .as_nanos();
    std::env::temp_dir().join(format!("cmdscript-rs-{}-{}", name, nanos))
}

pub(crate) fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("parent should be created");
    }
    fs::write(path, content).expect("file should be written");
}

pub(crate) fn c1_script(registry: &DialectRegistry) -> Script {
    let c1 = registry.get("c1").expect("c1");
    let mut builder = ScriptBuilder::new(c1, "hello.cos");
    builder.push_const(ConstValue::String("hello".to_string()), TokenTrace::new(7, 1));
    builder.call("cmd snde", TokenTrace::new(4, 1)).expect("snde");
    builder.call("cmd next", TokenTrace::new(4, 2)).expect("next");
    builder.source("snde \"hello\" next");
    builder.finish().expect("finish")
}

/// Saves a `c1` script with the built-in dialects and returns its path.
pub(crate) fn write_c1_script(name: &str, encoding: Encoding) -> PathBuf {
    let serializer = ScriptSerializer::new(cs_api::default_registry());
    let script = c1_script(serializer.registry());
    let path = temp_path(name);
    serializer
        .save_to_path(&script, &path, encoding)
        .expect("script should be saved");
    path
}
