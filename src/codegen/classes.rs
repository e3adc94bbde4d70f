use crate::domain::{Alignment, FieldType, FormStyle};

/// Class vocabulary for one output style. Utility output inlines the look;
/// semantic output names structure and relies on the generated stylesheet.
pub(crate) trait ClassScheme {
    fn form(&self) -> &'static str;
    fn section(&self, columns: usize) -> String;
    fn column(&self) -> &'static str;
    fn group(&self) -> &'static str;
    fn label(&self) -> &'static str;
    fn required_marker(&self) -> &'static str;
    fn control(&self, field_type: FieldType) -> String;
    fn choice_list(&self) -> &'static str;
    fn choice_item(&self) -> &'static str;
    fn choice_input(&self) -> &'static str;
    fn choice_label(&self) -> &'static str;
    fn button_row(&self, alignment: Alignment) -> String;
    fn button(&self, alignment: Alignment) -> String;
    fn html_block(&self) -> &'static str;
    fn slider_value(&self) -> &'static str;
    fn stepper(&self) -> &'static str;
    fn stepper_button(&self) -> &'static str;
    fn rating(&self) -> &'static str;
    fn rating_input(&self) -> &'static str;
    fn rating_star(&self) -> &'static str;
}

pub(crate) fn scheme_for(style: FormStyle) -> &'static dyn ClassScheme {
    if style.is_semantic() {
        &SemanticClasses
    } else {
        &UtilityClasses
    }
}

const UTILITY_CONTROL: &str = "mt-1 block w-full rounded-md border-gray-300 shadow-sm focus:border-indigo-300 focus:ring focus:ring-indigo-200 focus:ring-opacity-50";
const UTILITY_BUTTON: &str = "justify-center py-2 px-4 border border-transparent rounded-md shadow-sm text-sm font-medium text-white bg-indigo-600 hover:bg-indigo-700 focus:outline-none focus:ring-2 focus:ring-offset-2 focus:ring-indigo-500";

pub(crate) struct UtilityClasses;

impl ClassScheme for UtilityClasses {
    fn form(&self) -> &'static str {
        "space-y-6"
    }

    fn section(&self, columns: usize) -> String {
        format!("grid grid-cols-1 md:grid-cols-{columns} gap-4")
    }

    fn column(&self) -> &'static str {
        "space-y-4"
    }

    fn group(&self) -> &'static str {
        "mb-4"
    }

    fn label(&self) -> &'static str {
        "block text-sm font-medium text-gray-700"
    }

    fn required_marker(&self) -> &'static str {
        "text-red-500 ml-1"
    }

    fn control(&self, field_type: FieldType) -> String {
        match field_type {
            FieldType::File => "mt-1 block w-full text-sm text-gray-700".to_string(),
            FieldType::Slider => "mt-1 w-full accent-indigo-600".to_string(),
            FieldType::NumberIncrement => {
                "mx-2 w-20 rounded-md border-gray-300 text-center shadow-sm".to_string()
            }
            _ => UTILITY_CONTROL.to_string(),
        }
    }

    fn choice_list(&self) -> &'static str {
        "mt-2 space-y-2"
    }

    fn choice_item(&self) -> &'static str {
        "flex items-center"
    }

    fn choice_input(&self) -> &'static str {
        "mr-2 h-4 w-4 border-gray-300 text-indigo-600"
    }

    fn choice_label(&self) -> &'static str {
        "text-sm text-gray-700"
    }

    fn button_row(&self, alignment: Alignment) -> String {
        match alignment {
            Alignment::Left => "mb-4 text-left",
            Alignment::Center => "mb-4 text-center",
            Alignment::Right => "mb-4 text-right",
            Alignment::FullWidth => "mb-4",
        }
        .to_string()
    }

    fn button(&self, alignment: Alignment) -> String {
        match alignment {
            Alignment::FullWidth => format!("w-full flex {UTILITY_BUTTON}"),
            _ => format!("inline-flex {UTILITY_BUTTON}"),
        }
    }

    fn html_block(&self) -> &'static str {
        "mb-4"
    }

    fn slider_value(&self) -> &'static str {
        "text-sm text-gray-500"
    }

    fn stepper(&self) -> &'static str {
        "mt-1 flex items-center"
    }

    fn stepper_button(&self) -> &'static str {
        "px-3 py-1 border border-gray-300 rounded-md text-gray-700 hover:bg-gray-100"
    }

    fn rating(&self) -> &'static str {
        "mt-1 flex items-center space-x-1"
    }

    fn rating_input(&self) -> &'static str {
        "sr-only"
    }

    fn rating_star(&self) -> &'static str {
        "cursor-pointer text-2xl text-gray-300 hover:text-yellow-400"
    }
}

/// `block__element--modifier` names rooted at `form`.
pub(crate) struct SemanticClasses;

/// Modifier slug for a field type: `numberIncrement` becomes
/// `number-increment`.
pub(crate) fn type_slug(field_type: FieldType) -> String {
    field_type.base_name().replace('_', "-")
}

impl ClassScheme for SemanticClasses {
    fn form(&self) -> &'static str {
        "form"
    }

    fn section(&self, columns: usize) -> String {
        format!("form__section form__section--cols-{columns}")
    }

    fn column(&self) -> &'static str {
        "form__column"
    }

    fn group(&self) -> &'static str {
        "form__group"
    }

    fn label(&self) -> &'static str {
        "form__label"
    }

    fn required_marker(&self) -> &'static str {
        "form__required"
    }

    fn control(&self, field_type: FieldType) -> String {
        format!("form__control form__control--{}", type_slug(field_type))
    }

    fn choice_list(&self) -> &'static str {
        "form__choices"
    }

    fn choice_item(&self) -> &'static str {
        "form__choice"
    }

    fn choice_input(&self) -> &'static str {
        "form__choice-input"
    }

    fn choice_label(&self) -> &'static str {
        "form__choice-label"
    }

    fn button_row(&self, alignment: Alignment) -> String {
        format!("form__actions form__actions--{}", alignment.as_str())
    }

    fn button(&self, alignment: Alignment) -> String {
        match alignment {
            Alignment::FullWidth => "form__submit form__submit--full-width".to_string(),
            _ => "form__submit".to_string(),
        }
    }

    fn html_block(&self) -> &'static str {
        "form__html"
    }

    fn slider_value(&self) -> &'static str {
        "form__slider-value"
    }

    fn stepper(&self) -> &'static str {
        "form__stepper"
    }

    fn stepper_button(&self) -> &'static str {
        "form__stepper-button"
    }

    fn rating(&self) -> &'static str {
        "form__rating"
    }

    fn rating_input(&self) -> &'static str {
        "form__rating-input"
    }

    fn rating_star(&self) -> &'static str {
        "form__rating-star"
    }
}
