use crate::metadata::{
    method::{GenericInstanceMethod, MethodRc},
    typesystem::TypeRefRc,
};

pub(super) fn inflate(method: &MethodRc, argument: TypeRefRc) -> GenericInstanceMethod {
    let instance = GenericInstanceMethod::new(method);
    instance.push_argument(argument);
    instance
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{
        metadata::{
            method::Method,
            query::{MethodQueryExt, TypeQueryExt},
            token::Token,
        },
        test::{assembly_identity, class, external_ref, module},
    };

    #[test]
    fn test_single_argument_bound() {
        let module = module("Game.dll", "Game");
        let actor = external_ref(
            &module,
            1,
            "FlaxEngine",
            "Actor",
            assembly_identity("FlaxEngine.CSharp"),
        );
        let scene = class(&module, 1, "Game", "Scene")
            .method(
                Method::new(Token::new(0x0600_0001), "FindActor", vec![]).with_generic_param("T"),
            )
            .build()
            .unwrap();

        let find = scene.get_method("FindActor").unwrap();
        let instance = find.inflate_generic(actor.clone());

        assert_eq!(instance.argument_count(), 1);
        assert!(Arc::ptr_eq(&instance.element_method, &find));
        assert_eq!(instance.name(), "FindActor");
        assert_eq!(instance.fullname(), "Game.Scene::FindActor<FlaxEngine.Actor>");
    }

    #[test]
    fn test_slot_count_not_validated() {
        let module = module("Game.dll", "Game");
        let int = external_ref(&module, 1, "System", "Int32", assembly_identity("mscorlib"));

        let plain = Arc::new(Method::new(Token::new(0x0600_0001), "NotGeneric", vec![]));
        assert_eq!(plain.inflate_generic(int.clone()).argument_count(), 1);

        let pair = Arc::new(
            Method::new(Token::new(0x0600_0002), "Pair", vec![])
                .with_generic_param("TKey")
                .with_generic_param("TValue"),
        );
        let instance = pair.inflate_generic(int);
        assert_eq!(instance.argument_count(), 1);
        assert_eq!(instance.element_method.generic_params.count(), 2);
    }
}
