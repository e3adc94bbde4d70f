use std::collections::HashSet;

/// Hands out every `name`/`id` a rendered form uses. The first use of a
/// name keeps it; later uses get the first free `name-N`, so a suffixed
/// result never lands on a name already handed out.
#[derive(Debug, Default)]
pub(crate) struct RenderedNames {
    taken: HashSet<String>,
}

impl RenderedNames {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn claim(&mut self, name: &str) -> String {
        let rendered = if self.taken.contains(name) {
            (1..)
                .map(|suffix: usize| format!("{name}-{suffix}"))
                .find(|candidate| !self.taken.contains(candidate))
                .unwrap_or_else(|| name.to_string())
        } else {
            name.to_string()
        };
        self.taken.insert(rendered.clone());
        rendered
    }
}
