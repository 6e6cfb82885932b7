//! Emit the C source of a primitive library.
//!
//! Layout of the generated file:
//!
//!   1. header comment and libc includes
//!   2. `@include`d headers
//!   3. forward declarations
//!   4. constructor/destructor hooks calling the init/fini blocks
//!   5. `supported_classes` table and `supports_class()`
//!   6. init/fini bodies, then every primitive body

use crate::model::ModuleDescription;
use log::info;
use std::fmt::{self, Write as _};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const BANNER: &str = "/*************************************************/";

const LIFECYCLE_PROTOTYPES: &str = "\
/*** Lib initialization **/
#ifdef __GNUC__
void init(void) __attribute__((constructor));
void fini(void) __attribute__((destructor));
#else
void _init(void);
void _fini(void);
#pragma init _init
#pragma fini _fini
#endif
";

const SUPPORTS_CLASS: &str = "\
// returns, whether this lib is responsible for a specific class
bool\t\tsupports_class(const char* name) {
\t
\tchar **iter=supported_classes;
\twhile(*iter)
\t\tif (strcmp(name,*iter++)==0)
\t\t\treturn true;
\treturn false;
\t
}
";

/// `<class>.c`, the file name the generated library is written to.
pub fn output_file_name(desc: &ModuleDescription) -> String {
    format!("{}.c", desc.class())
}

/// Render `desc` and write it to `out_dir/<class>.c`, replacing any
/// existing file. Returns the written path.
pub fn emit(desc: &ModuleDescription, out_dir: &Path) -> io::Result<PathBuf> {
    let path = out_dir.join(output_file_name(desc));
    fs::write(&path, render(desc))?;
    info!("Wrote {}", path.display());
    Ok(path)
}

/// Full text of the generated C file.
pub fn render(desc: &ModuleDescription) -> String {
    let mut out = String::new();
    write_source(desc, &mut out).expect("formatting into a String cannot fail");
    out
}

fn write_source(desc: &ModuleDescription, out: &mut String) -> fmt::Result {
    let class = desc.class();

    // ---------------------------------------------------------------
    // 1. Header
    // ---------------------------------------------------------------
    writeln!(out, "/*")?;
    writeln!(out, " *  {class}.c")?;
    writeln!(out, " *  CSOM")?;
    writeln!(out, " *")?;
    writeln!(out, " *  Auto-generated - DO NOT EDIT")?;
    writeln!(out, " */\n")?;
    for header in ["<string.h>", "<stdlib.h>", "<stdio.h>", "<stdbool.h>"] {
        writeln!(out, "#include {header}")?;
    }
    writeln!(out, "\n")?;

    // ---------------------------------------------------------------
    // 2. Included headers
    // ---------------------------------------------------------------
    section(out, "Included Headers                  ")?;
    for include in &desc.includes {
        writeln!(out, "#include {include}")?;
    }
    writeln!(out)?;

    // ---------------------------------------------------------------
    // 3. Forward declarations
    // ---------------------------------------------------------------
    section(out, "Primitive Foreward Declaration    ")?;
    for decl in &desc.declarations {
        writeln!(out, "{decl};")?;
    }
    writeln!(out, "\n")?;

    // ---------------------------------------------------------------
    // 4. Library constructor / destructor
    // ---------------------------------------------------------------
    section(out, "Internal functions and init.      ")?;
    writeln!(out, "{LIFECYCLE_PROTOTYPES}")?;

    hook(out, "init")?;
    writeln!(out, "\t// Call init functions.")?;
    if let Some(block) = &desc.init_block {
        writeln!(out, "\t{}();", block.function_name)?;
    }
    writeln!(out, "}}\n")?;

    hook(out, "fini")?;
    if let Some(block) = &desc.fini_block {
        writeln!(out, "\t{}();", block.function_name)?;
    }
    writeln!(out, "}}\n")?;

    // ---------------------------------------------------------------
    // 5. Class lookup
    // ---------------------------------------------------------------
    writeln!(out, "// Classes supported by this lib.")?;
    writeln!(out, "static char *supported_classes[] = {{")?;
    writeln!(out, "    \"{class}\",")?;
    writeln!(out, "    NULL")?;
    writeln!(out, "}};\n\n")?;

    section(out, "Exported functions starting here  ")?;
    writeln!(out, "{SUPPORTS_CLASS}\n\n")?;

    // ---------------------------------------------------------------
    // 6. Bodies
    // ---------------------------------------------------------------
    writeln!(out, "{BANNER}\n{BANNER}")?;
    section(out, "Primitive Implementatition here   ")?;
    writeln!(out, "{BANNER}\n{BANNER}\n")?;
    writeln!(out, "/******* initialize ******************************/\n")?;

    for block in [&desc.init_block, &desc.fini_block].into_iter().flatten() {
        writeln!(out, "{}\n", block.body_lines.join("\n"))?;
    }

    let bodies: Vec<String> = desc
        .primitives
        .iter()
        .map(|(_, prim)| prim.body_lines.join("\n"))
        .collect();
    if !bodies.is_empty() {
        writeln!(out, "{}\n", bodies.join("\n\n\n"))?;
    }

    writeln!(out, "{BANNER}\n{BANNER}")?;
    section(out, "EOF                               ")?;
    writeln!(out, "{BANNER}\n{BANNER}")?;

    Ok(())
}

/// Three-line `#pragma mark` banner followed by an empty line.
fn section(out: &mut String, title: &str) -> fmt::Result {
    writeln!(out, "{BANNER}")?;
    writeln!(out, "#pragma mark * {title}*")?;
    writeln!(out, "{BANNER}\n")
}

/// Signature of the GNU constructor/destructor or its `#pragma` fallback.
fn hook(out: &mut String, name: &str) -> fmt::Result {
    writeln!(out, "#ifdef __GNUC__")?;
    writeln!(out, "void {name}(void)")?;
    writeln!(out, "#else")?;
    writeln!(out, "void _{name}(void)")?;
    writeln!(out, "#endif")?;
    writeln!(out, "{{")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LifecycleBlock, Primitive, PrimitiveTable};

    fn demo() -> ModuleDescription {
        let mut primitives = PrimitiveTable::new();
        primitives.insert(
            "run".into(),
            Primitive {
                mangled_name: "_Demo_run".into(),
                is_class_side: false,
                body_lines: vec![
                    "void _Demo_run(pVMObject object, pVMFrame frame){".into(),
                    "\tfoo();".into(),
                    "}".into(),
                ],
            },
        );
        ModuleDescription {
            class_name: Some("Demo".into()),
            includes: vec!["<math.h>".into(), "\"vm/Universe.h\"".into()],
            init_block: Some(LifecycleBlock {
                function_name: "__Demo_init".into(),
                body_lines: vec!["void __Demo_init(void){".into(), "}".into()],
            }),
            fini_block: None,
            primitives,
            declarations: vec![
                "void __Demo_init(void)".into(),
                "void _Demo_run(pVMObject object, pVMFrame frame)".into(),
            ],
        }
    }

    #[test]
    fn test_sections_in_order() {
        let c = render(&demo());

        let positions: Vec<usize> = [
            " *  Demo.c",
            "#include <stdbool.h>",
            "#include <math.h>",
            "#include \"vm/Universe.h\"",
            "void __Demo_init(void);",
            "void _Demo_run(pVMObject object, pVMFrame frame);",
            "__attribute__((constructor))",
            "\t__Demo_init();",
            "static char *supported_classes[] = {\n    \"Demo\",\n    NULL\n};",
            "supports_class(const char* name)",
            "void __Demo_init(void){\n}",
            "void _Demo_run(pVMObject object, pVMFrame frame){\n\tfoo();\n}",
            "#pragma mark * EOF",
        ]
        .iter()
        .map(|needle| {
            c.find(needle)
                .unwrap_or_else(|| panic!("missing {needle:?} in:\n{c}"))
        })
        .collect();

        let mut sorted = positions.clone();
        sorted.sort();
        assert_eq!(positions, sorted, "sections out of order");
    }

    #[test]
    fn test_pragma_fallback() {
        let c = render(&demo());
        assert!(c.contains("#pragma init _init\n#pragma fini _fini\n"));
        assert!(c.contains("#else\nvoid _init(void)\n#endif"));
        assert!(c.contains("#else\nvoid _fini(void)\n#endif"));
    }

    #[test]
    fn test_fini_hook_empty_without_block() {
        let c = render(&demo());
        assert!(c.contains("void _fini(void)\n#endif\n{\n}\n"));
        assert!(!c.contains("__Demo_fini"));
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name(&demo()), "Demo.c");
        assert_eq!(output_file_name(&ModuleDescription::default()), ".c");
    }
}
