use std::collections::HashSet;

use formsmith::{
    FieldType, FormConfig, FormStyle, FormType, SequentialIds,
    form::ops::{self, Direction},
    generate, generate_stylesheet,
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Step {
    Add(FieldType),
    AddSection(usize),
    Duplicate(usize),
    Adjust(usize, i32),
    Rename(usize, &'static str),
}

fn field_type() -> impl Strategy<Value = FieldType> {
    prop::sample::select(FieldType::ALL.to_vec())
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        4 => field_type().prop_map(Step::Add),
        1 => (0usize..6).prop_map(Step::AddSection),
        2 => any::<usize>().prop_map(Step::Duplicate),
        2 => (any::<usize>(), -4i32..=4).prop_map(|(pick, delta)| Step::Adjust(pick, delta)),
        2 => (
            any::<usize>(),
            prop::sample::select(vec!["radio-1", "rating-2", "slider-value", "text-1", "checkbox-0"]),
        )
            .prop_map(|(pick, name)| Step::Rename(pick, name)),
    ]
}

fn run(steps: &[Step]) -> FormConfig {
    let mut ids = SequentialIds::new();
    let mut config = FormConfig::new(FormType::Advanced, FormStyle::Css);
    for step in steps {
        config = match step {
            Step::Add(field_type) => ops::add_field(&config, *field_type, &mut ids),
            Step::AddSection(columns) => ops::add_section(&config, *columns, &mut ids),
            Step::Duplicate(pick) => {
                let slots: Vec<_> = config
                    .sections
                    .iter()
                    .flat_map(|section| {
                        section.columns().iter().enumerate().flat_map(move |(col, column)| {
                            column
                                .iter()
                                .map(move |field| (section.id().clone(), col, field.id.clone()))
                        })
                    })
                    .collect();
                if slots.is_empty() {
                    continue;
                }
                let (section, col, field) = &slots[pick % slots.len()];
                ops::duplicate_field(&config, section, *col, field, &mut ids)
            }
            Step::Adjust(pick, delta) => {
                if config.sections.is_empty() {
                    continue;
                }
                let section = config.sections[pick % config.sections.len()].id().clone();
                ops::adjust_section_columns(&config, &section, *delta)
            }
            Step::Rename(pick, name) => {
                let ids: Vec<_> = config.iter_fields().map(|field| field.id.clone()).collect();
                if ids.is_empty() {
                    continue;
                }
                ops::rename_field(&config, &ids[pick % ids.len()], name)
            }
        };
    }
    config
}

fn sorted_ids(config: &FormConfig) -> Vec<String> {
    let mut ids: Vec<String> = config
        .iter_fields()
        .map(|field| field.id.to_string())
        .collect();
    ids.sort();
    ids
}

proptest! {
    #[test]
    fn names_stay_pairwise_distinct(steps in prop::collection::vec(step(), 0..40)) {
        let config = run(&steps);
        let names: HashSet<&str> = config.iter_fields().map(|field| field.name.as_str()).collect();
        prop_assert_eq!(names.len(), config.field_count());
    }

    #[test]
    fn resizing_keeps_column_invariant_and_fields(
        steps in prop::collection::vec(step(), 1..20),
        deltas in prop::collection::vec(-4i32..=4, 1..10),
    ) {
        let mut config = run(&steps);
        for (idx, delta) in deltas.iter().enumerate() {
            if config.sections.is_empty() {
                break;
            }
            let section = config.sections[idx % config.sections.len()].id().clone();
            let before = sorted_ids(&config);
            let count_before = config.section(&section).map(|s| s.field_count());
            config = ops::adjust_section_columns(&config, &section, *delta);

            for section in &config.sections {
                prop_assert!((1..=4).contains(&section.column_count()));
                prop_assert_eq!(section.columns().len(), section.column_count());
            }
            prop_assert_eq!(config.section(&section).map(|s| s.field_count()), count_before);
            prop_assert_eq!(sorted_ids(&config), before);
        }
    }

    #[test]
    fn up_then_down_restores_column(len in 2usize..8, pick in any::<usize>()) {
        let mut ids = SequentialIds::new();
        let mut config = ops::add_section(&FormConfig::default(), 1, &mut ids);
        for _ in 0..len {
            config = ops::add_field(&config, FieldType::Text, &mut ids);
        }
        let section = config.sections[0].id().clone();
        let index = 1 + pick % (len - 1);
        let field = config.sections[0].columns()[0][index].id.clone();

        let up = ops::move_field(&config, &section, 0, &field, Direction::Up);
        prop_assert_ne!(&up, &config);
        let back = ops::move_field(&up, &section, 0, &field, Direction::Down);
        prop_assert_eq!(back, config);
    }

    #[test]
    fn generation_is_deterministic(
        steps in prop::collection::vec(step(), 0..25),
        style in prop::sample::select(vec![FormStyle::Tailwind, FormStyle::Css, FormStyle::Bem]),
    ) {
        let config = ops::set_style(&run(&steps), style);
        prop_assert_eq!(generate(&config), generate(&config));
        prop_assert_eq!(generate_stylesheet(&config), generate_stylesheet(&config));
    }

    #[test]
    fn rendered_names_are_unique(steps in prop::collection::vec(step(), 0..30)) {
        let markup = generate(&run(&steps));
        let names: Vec<&str> = markup
            .lines()
            .filter(|line| line.trim_start().starts_with("<input") || line.trim_start().starts_with("<select") || line.trim_start().starts_with("<textarea"))
            .filter(|line| !line.contains("type=\"radio\"") && !line.contains("type=\"checkbox\"") && !line.contains("type=\"hidden\""))
            .filter_map(|line| line.split(" name=\"").nth(1))
            .filter_map(|rest| rest.split('"').next())
            .collect();
        let distinct: HashSet<&str> = names.iter().copied().collect();
        prop_assert_eq!(distinct.len(), names.len());
    }

    #[test]
    fn rendered_element_ids_are_unique(steps in prop::collection::vec(step(), 0..30)) {
        let markup = generate(&run(&steps));
        let ids: Vec<&str> = markup
            .split(" id=\"")
            .skip(1)
            .filter_map(|rest| rest.split('"').next())
            .collect();
        let distinct: HashSet<&str> = ids.iter().copied().collect();
        prop_assert_eq!(distinct.len(), ids.len());
    }
}
