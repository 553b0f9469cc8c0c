use oxigraph::model::NamedNodeRef;

/// The SHACL vocabulary terms used by the path grammar.
pub(crate) struct SHACL {
    pub inverse_path: NamedNodeRef<'static>,
    pub alternative_path: NamedNodeRef<'static>,
    pub zero_or_more_path: NamedNodeRef<'static>,
    pub one_or_more_path: NamedNodeRef<'static>,
    pub zero_or_one_path: NamedNodeRef<'static>,
    // SHACL core has no graph encoding for negated property sets; this
    // coins the obvious IRI in the sh: namespace for descriptions that
    // need one.
    pub negated_property_set: NamedNodeRef<'static>,
}

impl SHACL {
    pub fn new() -> Self {
        Self {
            inverse_path: NamedNodeRef::new_unchecked("http://www.w3.org/ns/shacl#inversePath"),
            alternative_path: NamedNodeRef::new_unchecked(
                "http://www.w3.org/ns/shacl#alternativePath",
            ),
            zero_or_more_path: NamedNodeRef::new_unchecked(
                "http://www.w3.org/ns/shacl#zeroOrMorePath",
            ),
            one_or_more_path: NamedNodeRef::new_unchecked(
                "http://www.w3.org/ns/shacl#oneOrMorePath",
            ),
            zero_or_one_path: NamedNodeRef::new_unchecked(
                "http://www.w3.org/ns/shacl#zeroOrOnePath",
            ),
            negated_property_set: NamedNodeRef::new_unchecked(
                "http://www.w3.org/ns/shacl#negatedPropertySet",
            ),
        }
    }
}
