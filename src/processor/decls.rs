//! Forward declarations for every generated function.

use crate::model::ModuleDescription;
use crate::processor::mangle::mangle;

/// Prototypes in emission order: init, fini, then one per primitive.
///
/// Primitive prototypes always take the instance-side spelling
/// `_<class>_<selector>`, even for primitives defined after the `----`
/// marker whose definitions drop the leading underscore. Generated files
/// have always looked like this, so the mismatch is kept.
pub fn declarations(desc: &ModuleDescription) -> Vec<String> {
    let class = desc.class();

    let lifecycle = [&desc.init_block, &desc.fini_block]
        .into_iter()
        .flatten()
        .map(|block| format!("void {}(void)", block.function_name));

    let primitives = desc.primitives.selectors().map(|selector| {
        format!(
            "void _{}_{}(pVMObject object, pVMFrame frame)",
            class,
            mangle(selector)
        )
    });

    lifecycle.chain(primitives).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LifecycleBlock, Primitive, PrimitiveTable};

    fn prim(mangled_name: &str, is_class_side: bool) -> Primitive {
        Primitive {
            mangled_name: mangled_name.into(),
            is_class_side,
            body_lines: vec![],
        }
    }

    #[test]
    fn test_primitive_prototypes_in_table_order() {
        let mut primitives = PrimitiveTable::new();
        primitives.insert("foo".into(), prim("_C_foo", false));
        primitives.insert("at:put:".into(), prim("_C_at_put_", false));
        primitives.insert("+".into(), prim("_C_plus", false));

        let desc = ModuleDescription {
            class_name: Some("C".into()),
            primitives,
            ..Default::default()
        };

        assert_eq!(
            declarations(&desc),
            vec![
                "void _C_foo(pVMObject object, pVMFrame frame)",
                "void _C_at_put_(pVMObject object, pVMFrame frame)",
                "void _C_plus(pVMObject object, pVMFrame frame)",
            ]
        );
    }

    #[test]
    fn test_lifecycle_prototypes_come_first() {
        let block = |name: &str| LifecycleBlock {
            function_name: name.into(),
            body_lines: vec![],
        };
        let mut primitives = PrimitiveTable::new();
        primitives.insert("run".into(), prim("_D_run", false));

        let desc = ModuleDescription {
            class_name: Some("D".into()),
            init_block: Some(block("__D_init")),
            fini_block: Some(block("__D_fini")),
            primitives,
            ..Default::default()
        };

        assert_eq!(
            declarations(&desc),
            vec![
                "void __D_init(void)",
                "void __D_fini(void)",
                "void _D_run(pVMObject object, pVMFrame frame)",
            ]
        );
    }

    #[test]
    fn test_class_side_prototype_keeps_underscore() {
        // Definition is `D_new`; the prototype still says `_D_new`.
        let mut primitives = PrimitiveTable::new();
        primitives.insert("new".into(), prim("D_new", true));

        let desc = ModuleDescription {
            class_name: Some("D".into()),
            primitives,
            ..Default::default()
        };

        assert_eq!(
            declarations(&desc),
            vec!["void _D_new(pVMObject object, pVMFrame frame)"]
        );
    }
}
