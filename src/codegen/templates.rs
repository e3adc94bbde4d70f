use crate::domain::{Alignment, Field, FieldKind, FieldOption, NumericRange, RatingScale};

use super::{
    HtmlPolicy,
    classes::ClassScheme,
    names::RenderedNames,
    writer::{Attrs, MarkupWriter, escape_text},
};

pub(crate) const SLIDER_SCRIPT: &str = r#"document.querySelectorAll('[data-slider]').forEach(function (input) {
  var output = document.getElementById(input.dataset.slider);
  input.addEventListener('input', function () {
    output.textContent = input.value;
  });
});"#;

pub(crate) const STEPPER_SCRIPT: &str = r#"document.querySelectorAll('[data-stepper-target]').forEach(function (button) {
  button.addEventListener('click', function () {
    var input = document.getElementById(button.dataset.stepperTarget);
    var step = parseFloat(input.step) || 1;
    var next = (parseFloat(input.value) || 0) + step * parseFloat(button.dataset.stepperDelta);
    if (input.min !== '') next = Math.max(parseFloat(input.min), next);
    if (input.max !== '') next = Math.min(parseFloat(input.max), next);
    input.value = next;
  });
});"#;

pub(crate) struct RenderContext<'a> {
    pub(crate) classes: &'a dyn ClassScheme,
    pub(crate) html_policy: HtmlPolicy,
}

/// Emit the fragment for one field. The submission key and every element id
/// are claimed from `names`; buttons and raw markup claim nothing.
pub(crate) fn render_field(
    w: &mut MarkupWriter,
    field: &Field,
    names: &mut RenderedNames,
    ctx: &RenderContext<'_>,
) {
    let claimed = match &field.kind {
        FieldKind::Button(_) | FieldKind::Html(_) => None,
        _ => Some(names.claim(&field.name)),
    };
    let name = claimed.as_deref().unwrap_or(field.name.as_str());
    match &field.kind {
        FieldKind::Text(attrs)
        | FieldKind::Email(attrs)
        | FieldKind::Password(attrs)
        | FieldKind::Number(attrs)
        | FieldKind::Tel(attrs)
        | FieldKind::Date(attrs) => {
            grouped(w, ctx, field, Some(name), |w| {
                let input = Attrs::new()
                    .set("type", field.field_type().as_str())
                    .set("id", name)
                    .set("name", name)
                    .set("class", ctx.classes.control(field.field_type()))
                    .set_nonempty("placeholder", &attrs.placeholder)
                    .flag("required", field.is_required());
                w.line(format!("<input{input}>"));
            });
        }
        FieldKind::Textarea(attrs) => grouped(w, ctx, field, Some(name), |w| {
            let textarea = Attrs::new()
                .set("id", name)
                .set("name", name)
                .set("rows", "3")
                .set("class", ctx.classes.control(field.field_type()))
                .set_nonempty("placeholder", &attrs.placeholder)
                .flag("required", field.is_required());
            w.line(format!("<textarea{textarea}></textarea>"));
        }),
        FieldKind::Select(choices) => grouped(w, ctx, field, Some(name), |w| {
            let select = Attrs::new()
                .set("id", name)
                .set("name", name)
                .set("class", ctx.classes.control(field.field_type()))
                .flag("required", field.is_required());
            w.open(format!("<select{select}>"));
            for option in &choices.options {
                let attrs = Attrs::new().set("value", &option.value);
                w.line(format!("<option{attrs}>{}</option>", escape_text(&option.label)));
            }
            w.close("</select>");
        }),
        FieldKind::Radio(choices) => grouped(w, ctx, field, None, |w| {
            choice_list(w, ctx, names, "radio", name, &choices.options, field.is_required());
        }),
        FieldKind::Checkbox(choices) => grouped(w, ctx, field, None, |w| {
            // `required` on every box would demand all of them; leave it off.
            choice_list(w, ctx, names, "checkbox", name, &choices.options, false);
        }),
        FieldKind::File => grouped(w, ctx, field, Some(name), |w| {
            let input = Attrs::new()
                .set("type", "file")
                .set("id", name)
                .set("name", name)
                .set("class", ctx.classes.control(field.field_type()))
                .flag("required", field.is_required());
            w.line(format!("<input{input}>"));
        }),
        FieldKind::Button(button) => submit_button(w, ctx, &field.label, button.alignment),
        FieldKind::Html(html) => {
            w.open(format!("<div{}>", Attrs::new().set("class", ctx.classes.html_block())));
            match ctx.html_policy {
                HtmlPolicy::Raw => w.block(&html.content),
                HtmlPolicy::Escape => w.block(&escape_text(&html.content)),
            }
            w.close("</div>");
        }
        FieldKind::Slider(range) => grouped(w, ctx, field, Some(name), |w| {
            slider(w, ctx, names, field, name, range);
        }),
        FieldKind::NumberIncrement(range) => grouped(w, ctx, field, Some(name), |w| {
            stepper(w, ctx, field, name, range);
        }),
        FieldKind::Rating(scale) => grouped(w, ctx, field, None, |w| {
            rating(w, ctx, names, field, name, scale);
        }),
    }
}

/// Submit control shared by `button` fields and the fallback button.
pub(crate) fn submit_button(
    w: &mut MarkupWriter,
    ctx: &RenderContext<'_>,
    label: &str,
    alignment: Alignment,
) {
    w.open(format!(
        "<div{}>",
        Attrs::new().set("class", ctx.classes.button_row(alignment))
    ));
    let button = Attrs::new()
        .set("type", "submit")
        .set("class", ctx.classes.button(alignment));
    w.line(format!("<button{button}>{}</button>", escape_text(label)));
    w.close("</div>");
}

/// Labeled container around a control. `label_for` is `None` for groups of
/// inputs, whose label names the group rather than one control.
fn grouped(
    w: &mut MarkupWriter,
    ctx: &RenderContext<'_>,
    field: &Field,
    label_for: Option<&str>,
    body: impl FnOnce(&mut MarkupWriter),
) {
    w.open(format!("<div{}>", Attrs::new().set("class", ctx.classes.group())));
    let mut label = Attrs::new();
    if let Some(target) = label_for {
        label = label.set("for", target);
    }
    let label = label.set("class", ctx.classes.label());
    let marker = if field.is_required() {
        format!(
            "<span{}>*</span>",
            Attrs::new().set("class", ctx.classes.required_marker())
        )
    } else {
        String::new()
    };
    w.line(format!(
        "<label{label}>{}{marker}</label>",
        escape_text(&field.label)
    ));
    body(w);
    w.close("</div>");
}

fn choice_list(
    w: &mut MarkupWriter,
    ctx: &RenderContext<'_>,
    names: &mut RenderedNames,
    input_type: &str,
    name: &str,
    options: &[FieldOption],
    required: bool,
) {
    w.open(format!("<div{}>", Attrs::new().set("class", ctx.classes.choice_list())));
    for (idx, option) in options.iter().enumerate() {
        let id = names.claim(&format!("{name}-{idx}"));
        w.open(format!("<div{}>", Attrs::new().set("class", ctx.classes.choice_item())));
        let input = Attrs::new()
            .set("type", input_type)
            .set("id", &id)
            .set("name", name)
            .set("value", &option.value)
            .set("class", ctx.classes.choice_input())
            .flag("required", required);
        w.line(format!("<input{input}>"));
        let label = Attrs::new()
            .set("for", &id)
            .set("class", ctx.classes.choice_label());
        w.line(format!("<label{label}>{}</label>", escape_text(&option.label)));
        w.close("</div>");
    }
    w.close("</div>");
}

fn range_attrs(attrs: Attrs, range: &NumericRange) -> Attrs {
    attrs
        .set("min", range.min.to_string())
        .set("max", range.max.to_string())
        .set("step", range.step.to_string())
        .set("value", range.value.to_string())
}

fn slider(
    w: &mut MarkupWriter,
    ctx: &RenderContext<'_>,
    names: &mut RenderedNames,
    field: &Field,
    name: &str,
    range: &NumericRange,
) {
    let output_id = names.claim(&format!("{name}-value"));
    let input = Attrs::new()
        .set("type", "range")
        .set("id", name)
        .set("name", name);
    let input = range_attrs(input, range)
        .set("class", ctx.classes.control(field.field_type()))
        .set("data-slider", &output_id)
        .flag("required", field.is_required());
    w.line(format!("<input{input}>"));
    let output = Attrs::new()
        .set("id", &output_id)
        .set("for", name)
        .set("class", ctx.classes.slider_value());
    w.line(format!("<output{output}>{}</output>", range.value));
}

fn stepper(
    w: &mut MarkupWriter,
    ctx: &RenderContext<'_>,
    field: &Field,
    name: &str,
    range: &NumericRange,
) {
    w.open(format!("<div{}>", Attrs::new().set("class", ctx.classes.stepper())));
    for (delta, glyph) in [("-1", "-"), ("1", "+")] {
        if delta == "1" {
            let input = Attrs::new()
                .set("type", "number")
                .set("id", name)
                .set("name", name);
            let input = range_attrs(input, range)
                .set("class", ctx.classes.control(field.field_type()))
                .flag("required", field.is_required());
            w.line(format!("<input{input}>"));
        }
        let button = Attrs::new()
            .set("type", "button")
            .set("class", ctx.classes.stepper_button())
            .set("data-stepper-target", name)
            .set("data-stepper-delta", delta);
        w.line(format!("<button{button}>{glyph}</button>"));
    }
    w.close("</div>");
}

fn rating(
    w: &mut MarkupWriter,
    ctx: &RenderContext<'_>,
    names: &mut RenderedNames,
    field: &Field,
    name: &str,
    scale: &RatingScale,
) {
    w.open(format!("<div{}>", Attrs::new().set("class", ctx.classes.rating())));
    for score in 1..=scale.max_rating {
        let id = names.claim(&format!("{name}-{score}"));
        let input = Attrs::new()
            .set("type", "radio")
            .set("id", &id)
            .set("name", name)
            .set("value", score.to_string())
            .set("class", ctx.classes.rating_input())
            .flag("checked", score == scale.value)
            .flag("required", field.is_required());
        w.line(format!("<input{input}>"));
        let label = Attrs::new()
            .set("for", &id)
            .set("class", ctx.classes.rating_star())
            .set("title", format!("{score} of {}", scale.max_rating));
        w.line(format!("<label{label}>&#9733;</label>"));
    }
    w.close("</div>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::classes::{SemanticClasses, UtilityClasses};
    use crate::domain::{FieldId, FieldPatch, FieldType};

    fn render(field: &Field, classes: &dyn ClassScheme, policy: HtmlPolicy) -> String {
        let mut w = MarkupWriter::new(2);
        let ctx = RenderContext {
            classes,
            html_policy: policy,
        };
        render_field(&mut w, field, &mut RenderedNames::new(), &ctx);
        w.finish()
    }

    fn field(field_type: FieldType, name: &str) -> Field {
        Field::new(FieldId::new("f"), name, field_type)
    }

    #[test]
    fn text_input_passes_placeholder_and_required() {
        let field = field(FieldType::Email, "email").merged(
            &FieldPatch::new()
                .with_placeholder("you@example.com")
                .with_required(true),
        );
        let out = render(&field, &SemanticClasses, HtmlPolicy::Raw);
        assert_eq!(
            out,
            concat!(
                "<div class=\"form__group\">\n",
                "  <label for=\"email\" class=\"form__label\">Email<span class=\"form__required\">*</span></label>\n",
                "  <input type=\"email\" id=\"email\" name=\"email\" class=\"form__control form__control--email\" placeholder=\"you@example.com\" required>\n",
                "</div>\n"
            )
        );
    }

    #[test]
    fn radio_group_renders_one_input_per_option() {
        let out = render(&field(FieldType::Radio, "plan"), &UtilityClasses, HtmlPolicy::Raw);
        assert_eq!(out.matches("type=\"radio\"").count(), 2);
        assert!(out.contains("id=\"plan-0\" name=\"plan\" value=\"option_1\""));
        assert!(out.contains("<label for=\"plan-1\" class=\"text-sm text-gray-700\">Option 2</label>"));
        assert!(out.contains("<label class=\"block text-sm font-medium text-gray-700\">Radio</label>"));
    }

    #[test]
    fn html_policy_controls_escaping() {
        let html = field(FieldType::Html, "html")
            .merged(&FieldPatch::new().with_content("<b>Terms</b>"));
        assert!(render(&html, &SemanticClasses, HtmlPolicy::Raw).contains("  <b>Terms</b>\n"));
        assert!(
            render(&html, &SemanticClasses, HtmlPolicy::Escape)
                .contains("  &lt;b&gt;Terms&lt;/b&gt;\n")
        );
    }

    #[test]
    fn button_honours_alignment() {
        let button = field(FieldType::Button, "button")
            .merged(&FieldPatch::new().with_alignment(Alignment::Center).with_label("Send"));
        let out = render(&button, &SemanticClasses, HtmlPolicy::Raw);
        assert_eq!(
            out,
            concat!(
                "<div class=\"form__actions form__actions--center\">\n",
                "  <button type=\"submit\" class=\"form__submit\">Send</button>\n",
                "</div>\n"
            )
        );
    }

    #[test]
    fn slider_and_stepper_carry_behaviour_hooks() {
        let slider = render(&field(FieldType::Slider, "volume"), &UtilityClasses, HtmlPolicy::Raw);
        assert!(slider.contains(
            "type=\"range\" id=\"volume\" name=\"volume\" min=\"0\" max=\"100\" step=\"1\" value=\"0\""
        ));
        assert!(slider.contains("data-slider=\"volume-value\""));
        assert!(slider.contains("<output id=\"volume-value\" for=\"volume\""));

        let stepper = render(
            &field(FieldType::NumberIncrement, "qty"),
            &SemanticClasses,
            HtmlPolicy::Raw,
        );
        let minus = stepper.find("data-stepper-delta=\"-1\"").unwrap();
        let input = stepper.find("type=\"number\"").unwrap();
        let plus = stepper.find("data-stepper-delta=\"1\"").unwrap();
        assert!(minus < input && input < plus);
    }

    #[test]
    fn rating_renders_scale_of_radios() {
        let rating = field(FieldType::Rating, "stars")
            .merged(&FieldPatch::new().with_max_rating(3).with_value(2.0));
        let out = render(&rating, &SemanticClasses, HtmlPolicy::Raw);
        assert_eq!(out.matches("type=\"radio\"").count(), 3);
        assert!(out.contains("id=\"stars-2\" name=\"stars\" value=\"2\" class=\"form__rating-input\" checked"));
        assert!(out.contains("title=\"3 of 3\""));
    }

    #[test]
    fn labels_and_options_are_escaped() {
        let select = field(FieldType::Select, "size").merged(
            &FieldPatch::new()
                .with_label("Size <cm>")
                .with_options(vec![FieldOption::new("a\"b", "A & B")]),
        );
        let out = render(&select, &SemanticClasses, HtmlPolicy::Raw);
        assert!(out.contains(">Size &lt;cm&gt;</label>"));
        assert!(out.contains("<option value=\"a&quot;b\">A &amp; B</option>"));
    }
}
