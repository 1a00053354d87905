use crate::{descriptor::PackageDescriptor, slug::Slugifier};

/// Stable identifier of an extension.
///
/// The descriptor's `name` field verbatim (case preserved) when present and
/// non-empty, otherwise the slug of the display name.
pub fn resolve_machine_name(
    descriptor: Option<&PackageDescriptor>,
    display_name: &str,
    slugifier: &dyn Slugifier,
) -> String {
    match descriptor.and_then(PackageDescriptor::name) {
        Some(name) => name.to_string(),
        None => slugifier.slugify(display_name),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Map, Value};

    use super::*;
    use crate::slug::DefaultSlugifier;

    fn descriptor(name: Value) -> PackageDescriptor {
        let mut fields = Map::new();
        fields.insert("name".into(), name);
        PackageDescriptor::new(fields)
    }

    #[test]
    fn descriptor_name_is_kept_verbatim() {
        let d = descriptor(Value::from("Bolt/FooBar-Extension"));
        assert_eq!(
            resolve_machine_name(Some(&d), "Foo Bar", &DefaultSlugifier),
            "Bolt/FooBar-Extension"
        );
    }

    #[test]
    fn falls_back_to_slug_without_descriptor() {
        assert_eq!(
            resolve_machine_name(None, "Foo Bar", &DefaultSlugifier),
            "foo-bar"
        );
    }

    #[test]
    fn falls_back_to_slug_on_empty_name() {
        let d = descriptor(Value::from(""));
        assert_eq!(
            resolve_machine_name(Some(&d), "Foo Bar", &DefaultSlugifier),
            "foo-bar"
        );
    }
}
