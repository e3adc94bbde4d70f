use std::{collections::BTreeSet, fmt::Write as _};

use indexmap::IndexMap;

use crate::domain::{FieldType, FormConfig};

type Declarations = Vec<(&'static str, String)>;

/// Ordered rule set. Re-declaring a selector merges into the first
/// occurrence so shared rules (radio and checkbox) are emitted once.
#[derive(Debug, Default)]
struct RuleSet {
    rules: IndexMap<String, Declarations>,
}

impl RuleSet {
    fn rule(&mut self, selector: impl Into<String>, declarations: &[(&'static str, &str)]) {
        let entry = self.rules.entry(selector.into()).or_default();
        for &(property, value) in declarations {
            match entry.iter_mut().find(|slot| slot.0 == property) {
                Some(slot) => slot.1 = value.to_string(),
                None => entry.push((property, value.to_string())),
            }
        }
    }

    fn write(&self, out: &mut String, depth: usize, indent: usize) {
        let pad = depth * indent;
        let inner = (depth + 1) * indent;
        for (idx, (selector, declarations)) in self.rules.iter().enumerate() {
            if idx > 0 {
                out.push('\n');
            }
            let _ = writeln!(out, "{:pad$}{selector} {{", "");
            for (property, value) in declarations {
                let _ = writeln!(out, "{:inner$}{property}: {value};", "");
            }
            let _ = writeln!(out, "{:pad$}}}", "");
        }
    }
}

const CONTROL_BORDER: &str = "1px solid #d1d5db";
const ACCENT: &str = "#4f46e5";

/// Stylesheet for the semantic class vocabulary. Only the column counts and
/// field types present in `config` contribute rules beyond the base set.
pub(crate) fn semantic_stylesheet(config: &FormConfig, indent: usize) -> String {
    let mut base = RuleSet::default();
    base_rules(&mut base);

    for field_type in FieldType::ALL {
        if config.has_field_type(field_type) {
            type_rules(&mut base, field_type);
        }
    }

    let column_counts: BTreeSet<usize> = config
        .sections
        .iter()
        .map(|section| section.column_count())
        .filter(|count| *count > 1)
        .collect();
    let mut wide = RuleSet::default();
    for count in column_counts {
        let template = format!("repeat({count}, minmax(0, 1fr))");
        wide.rule(
            format!(".form__section--cols-{count}"),
            &[("grid-template-columns", template.as_str())],
        );
    }

    let mut out = String::new();
    base.write(&mut out, 0, indent);
    if !wide.rules.is_empty() {
        out.push_str("\n@media (min-width: 768px) {\n");
        wide.write(&mut out, 1, indent);
        out.push_str("}\n");
    }
    out
}

fn base_rules(rules: &mut RuleSet) {
    rules.rule(
        ".form",
        &[
            ("display", "flex"),
            ("flex-direction", "column"),
            ("gap", "1.5rem"),
        ],
    );
    rules.rule(
        ".form__section",
        &[
            ("display", "grid"),
            ("grid-template-columns", "minmax(0, 1fr)"),
            ("gap", "1rem"),
        ],
    );
    rules.rule(
        ".form__column",
        &[
            ("display", "flex"),
            ("flex-direction", "column"),
            ("gap", "1rem"),
        ],
    );
    rules.rule(".form__group", &[("margin-bottom", "1rem")]);
    rules.rule(
        ".form__label",
        &[
            ("display", "block"),
            ("font-size", "0.875rem"),
            ("font-weight", "500"),
            ("color", "#374151"),
        ],
    );
    rules.rule(
        ".form__required",
        &[("color", "#ef4444"), ("margin-left", "0.25rem")],
    );
    rules.rule(
        ".form__control",
        &[
            ("display", "block"),
            ("width", "100%"),
            ("margin-top", "0.25rem"),
            ("padding", "0.5rem 0.75rem"),
            ("border", CONTROL_BORDER),
            ("border-radius", "0.375rem"),
            ("box-shadow", "0 1px 2px rgba(0, 0, 0, 0.05)"),
        ],
    );
    rules.rule(
        ".form__control:focus",
        &[
            ("outline", "none"),
            ("border-color", "#a5b4fc"),
            ("box-shadow", "0 0 0 3px rgba(199, 210, 254, 0.5)"),
        ],
    );
    // Every generated form carries a submit control.
    rules.rule(".form__actions", &[("margin-bottom", "1rem")]);
    rules.rule(".form__actions--left", &[("text-align", "left")]);
    rules.rule(".form__actions--center", &[("text-align", "center")]);
    rules.rule(".form__actions--right", &[("text-align", "right")]);
    rules.rule(
        ".form__submit",
        &[
            ("display", "inline-flex"),
            ("justify-content", "center"),
            ("padding", "0.5rem 1rem"),
            ("border", "1px solid transparent"),
            ("border-radius", "0.375rem"),
            ("font-size", "0.875rem"),
            ("font-weight", "500"),
            ("color", "#ffffff"),
            ("background-color", ACCENT),
            ("cursor", "pointer"),
        ],
    );
    rules.rule(".form__submit:hover", &[("background-color", "#4338ca")]);
    rules.rule(
        ".form__submit--full-width",
        &[("display", "flex"), ("width", "100%")],
    );
}

fn type_rules(rules: &mut RuleSet, field_type: FieldType) {
    match field_type {
        FieldType::Textarea => rules.rule(".form__control--textarea", &[("resize", "vertical")]),
        FieldType::Select => {
            rules.rule(".form__control--select", &[("background-color", "#ffffff")])
        }
        FieldType::Checkbox | FieldType::Radio => {
            rules.rule(
                ".form__choices",
                &[
                    ("display", "flex"),
                    ("flex-direction", "column"),
                    ("gap", "0.5rem"),
                    ("margin-top", "0.5rem"),
                ],
            );
            rules.rule(
                ".form__choice",
                &[("display", "flex"), ("align-items", "center")],
            );
            rules.rule(
                ".form__choice-input",
                &[
                    ("width", "1rem"),
                    ("height", "1rem"),
                    ("margin-right", "0.5rem"),
                    ("accent-color", ACCENT),
                ],
            );
            rules.rule(
                ".form__choice-label",
                &[("font-size", "0.875rem"), ("color", "#374151")],
            );
        }
        FieldType::File => rules.rule(
            ".form__control--file",
            &[("padding", "0"), ("border", "none"), ("box-shadow", "none")],
        ),
        FieldType::Html => rules.rule(".form__html", &[("margin-bottom", "1rem")]),
        FieldType::Slider => {
            rules.rule(
                ".form__control--slider",
                &[
                    ("padding", "0"),
                    ("border", "none"),
                    ("box-shadow", "none"),
                    ("accent-color", ACCENT),
                ],
            );
            rules.rule(
                ".form__slider-value",
                &[("font-size", "0.875rem"), ("color", "#6b7280")],
            );
        }
        FieldType::NumberIncrement => {
            rules.rule(
                ".form__stepper",
                &[
                    ("display", "flex"),
                    ("align-items", "center"),
                    ("margin-top", "0.25rem"),
                ],
            );
            rules.rule(
                ".form__stepper-button",
                &[
                    ("padding", "0.25rem 0.75rem"),
                    ("border", CONTROL_BORDER),
                    ("border-radius", "0.375rem"),
                    ("background-color", "#ffffff"),
                    ("color", "#374151"),
                    ("cursor", "pointer"),
                ],
            );
            rules.rule(".form__stepper-button:hover", &[("background-color", "#f3f4f6")]);
            rules.rule(
                ".form__control--number-increment",
                &[
                    ("width", "5rem"),
                    ("margin", "0 0.5rem"),
                    ("text-align", "center"),
                ],
            );
        }
        FieldType::Rating => {
            rules.rule(
                ".form__rating",
                &[
                    ("display", "flex"),
                    ("align-items", "center"),
                    ("gap", "0.25rem"),
                    ("margin-top", "0.25rem"),
                ],
            );
            rules.rule(
                ".form__rating-input",
                &[
                    ("position", "absolute"),
                    ("width", "1px"),
                    ("height", "1px"),
                    ("overflow", "hidden"),
                    ("clip", "rect(0, 0, 0, 0)"),
                ],
            );
            rules.rule(
                ".form__rating-star",
                &[
                    ("font-size", "1.5rem"),
                    ("color", "#d1d5db"),
                    ("cursor", "pointer"),
                ],
            );
            rules.rule(".form__rating-star:hover", &[("color", "#facc15")]);
            rules.rule(
                ".form__rating-input:checked + .form__rating-star",
                &[("color", "#facc15")],
            );
        }
        FieldType::Text
        | FieldType::Email
        | FieldType::Password
        | FieldType::Number
        | FieldType::Tel
        | FieldType::Date
        | FieldType::Button => {}
    }
}
