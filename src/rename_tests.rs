#[cfg(test)]
mod tests {
    use crate::document::{parse_html, serialize_html};
    use crate::{
        rename, rename_all, rename_with_options, BindingMode, RenameError, RenameMap,
        RenameOptions,
    };
    use pretty_assertions::assert_eq;

    fn test_map() -> RenameMap {
        [("a", "renamedA"), ("longName", "rb"), ("three", "renamed3")]
            .into_iter()
            .collect()
    }

    fn reserialized(html: &str) -> String {
        serialize_html(&parse_html(html).unwrap()).unwrap()
    }

    #[test]
    fn test_modern_template_binding() {
        let html = r#"<dom-module name="x-foo"><template><p>{{a}}</p></template></dom-module>"#;
        assert_eq!(
            rename(&test_map(), html).unwrap(),
            r#"<html><head></head><body><dom-module name="x-foo"><template><p>{{renamedA}}</p></template></dom-module></body></html>"#
        );
    }

    #[test]
    fn test_modern_document() {
        let html = r#"<dom-module name="x-foo"><template><div class="box" title="[[three.longName]]" on-tap="a">Hello {{ a(three.*, longName) }} and {{other}}</div></template><script>Polymer({is: 'x-foo', compute: function(a) { return this.a + this.longNameChanged + a; }});</script></dom-module>"#;
        let out = rename(&test_map(), html).unwrap();

        assert!(out.contains(r#"title="[[renamed3.rb]]""#));
        // Plain attribute values are not bindings.
        assert!(out.contains(r#"on-tap="a""#));
        assert!(out.contains("Hello {{renamedA(renamed3.*,rb)}} and {{other}}"));
        assert!(out.contains(
            "compute: function(a) { return this.renamedA + this.rbChanged + a; }"
        ));
        assert!(out.contains("is: 'x-foo'"));
    }

    #[test]
    fn test_legacy_document() {
        let html = r#"<polymer-element name="x-bar" attributes="a longName other"><template><span title="{{three}}">[[a]] {{a}}</span></template><script>Polymer('x-bar', {aChanged: function() { this.three = this.a; }});</script></polymer-element>"#;
        let out = rename(&test_map(), html).unwrap();

        assert!(out.contains(r#"<polymer-element name="x-bar" attributes="renamedA rb other">"#));
        assert!(out.contains(r#"<span title="{{renamed3}}">[[a]] {{renamedA}}</span>"#));
        assert!(out.contains("{aChanged: function() { this.renamed3 = this.renamedA; }}"));
    }

    #[test]
    fn test_legacy_multiline_property_list() {
        let html = "<polymer-element name=\"x-bar\" attributes=\"a,\n    longName\">\
                    <template>{{ a[[0]] }}</template></polymer-element>";
        let out = rename(&test_map(), html).unwrap();

        assert!(out.contains("attributes=\"renamedA,\n    rb\""));
        assert!(out.contains("<template>{{renamedA[[0]]}}</template>"));
    }

    #[test]
    fn test_custom_element_attribute_names() {
        let html = r#"<dom-module name="x-foo"><template><div>[[three]]</div></template></dom-module><x-foo long-name="{{a}}" three="3" a="1" plain="p"></x-foo>"#;
        let out = rename(&test_map(), html).unwrap();

        // Only the key is remapped; usages live outside declarations, so values stay.
        assert!(out.contains(r#"<x-foo rb="{{a}}" renamed3="3" renamed-a="1" plain="p"></x-foo>"#));
        assert!(out.contains("<div>[[renamed3]]</div>"));
    }

    #[test]
    fn test_legacy_usages_keep_attribute_names() {
        let html = r#"<polymer-element name="x-bar" attributes="longName"></polymer-element><x-bar long-name="1"></x-bar>"#;
        let out = rename(&test_map(), html).unwrap();
        assert!(out.contains(r#"<x-bar long-name="1"></x-bar>"#));
    }

    #[test]
    fn test_content_outside_declarations_untouched() {
        let html = r#"<script>this.a = 1;</script><div title="{{a}}">{{a}}</div><dom-module name="x-foo"></dom-module>"#;
        let out = rename(&test_map(), html).unwrap();
        assert!(out.contains("<script>this.a = 1;</script>"));
        assert!(out.contains(r#"<div title="{{a}}">{{a}}</div>"#));
    }

    #[test]
    fn test_style_is_not_renamed() {
        let html = r#"<dom-module name="x-foo"><style>:host { --x: {{a}}; }</style></dom-module>"#;
        let out = rename(&test_map(), html).unwrap();
        assert!(out.contains(":host { --x: {{a}}; }"));
    }

    #[test]
    fn test_script_attributes_untouched() {
        let html = r#"<dom-module name="x-foo"><script data-x="{{a}}">this.a;</script></dom-module>"#;
        let out = rename(&test_map(), html).unwrap();
        assert!(out.contains(r#"<script data-x="{{a}}">this.renamedA;</script>"#));
    }

    #[test]
    fn test_text_is_reescaped() {
        let html = r#"<dom-module name="x-foo"><template><p>&amp; {{a}} &lt;</p></template></dom-module>"#;
        let out = rename(&test_map(), html).unwrap();
        assert!(out.contains("<p>&amp; {{renamedA}} &lt;</p>"));
    }

    #[test]
    fn test_malformed_binding_aborts() {
        let html = r#"<dom-module name="x-foo"><template><div>{{a)}}</div></template></dom-module>"#;
        let err = rename(&test_map(), html).unwrap_err();
        assert!(matches!(err, RenameError::MalformedExpression(_)));
    }

    #[test]
    fn test_malformed_binding_outside_declaration_ignored() {
        let html = r#"<div>{{a)}}</div><dom-module name="x-foo"></dom-module>"#;
        assert!(rename(&test_map(), html).is_ok());
    }

    #[test]
    fn test_empty_map_is_identity() {
        let html = r#"<dom-module name="x-foo"><template><b title="{{ a + b }}">{{a}}</b></template><script>this.a = 1;</script></dom-module><x-foo long-name="1"></x-foo>"#;
        assert_eq!(rename(&RenameMap::default(), html).unwrap(), reserialized(html));
    }

    #[test]
    fn test_unmapped_document_is_unchanged() {
        let map: RenameMap = [("unused", "u")].into_iter().collect();
        let html = r#"<dom-module name="x-foo"><template><b title="{{ x( y ) }}">[[ z ]]</b></template><script>this.a = 1;</script></dom-module><x-foo long-name="1"></x-foo>"#;
        assert_eq!(rename(&map, html).unwrap(), reserialized(html));
    }

    #[test]
    fn test_forced_dialect() {
        let html = r#"<polymer-element name="x-old" attributes="a"><template>{{three}} [[a]]</template></polymer-element><dom-module name="x-new"><template>[[a]]</template></dom-module>"#;

        let detected = rename(&test_map(), html).unwrap();
        assert!(detected.contains(r#"attributes="a""#));
        assert!(detected.contains("{{three}} [[a]]"));
        assert!(detected.contains("<template>[[renamedA]]</template>"));

        let forced = rename_with_options(
            &test_map(),
            html,
            &RenameOptions::with_dialect(BindingMode::Legacy),
        )
        .unwrap();
        assert!(forced.contains(r#"attributes="renamedA""#));
        assert!(forced.contains("{{renamed3}} [[a]]"));
        assert!(forced.contains("<template>[[a]]</template>"));
    }

    #[test]
    fn test_rename_all() {
        let documents = [
            r#"<dom-module name="x-a"><template>{{a}}</template></dom-module>"#,
            r#"<dom-module name="x-b"><template>{{a(}}</template></dom-module>"#,
            r#"<dom-module name="x-c"><template>[[three]]</template></dom-module>"#,
        ];
        let results = rename_all(&test_map(), &documents);

        assert_eq!(results.len(), 3);
        assert!(results[0].as_ref().unwrap().contains("{{renamedA}}"));
        assert!(matches!(results[1], Err(RenameError::MalformedExpression(_))));
        assert!(results[2].as_ref().unwrap().contains("[[renamed3]]"));
    }
}
