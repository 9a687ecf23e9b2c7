use chrono::NaiveDate;

use crate::schema::{InvoiceTemplate, TemplateField, TemplateLayout, short_id};
use crate::validation::ValidationErrors;

/// Template editor form input before validation
#[derive(Debug, Clone)]
pub struct TemplateForm {
    pub name: String,
    pub layout: TemplateLayout,
    pub primary_color: String,
    pub accent_color: String,
    pub font: String,
    pub fields: Vec<TemplateField>,
}

/// Invoice template customization screen state
///
/// Create, edit, duplicate, and delete live entirely in this local list.
/// Exactly one template may carry the default flag, and the default one
/// cannot be deleted.
#[derive(Debug, Default)]
pub struct TemplateManager {
    templates: Vec<InvoiceTemplate>,
}

impl TemplateManager {
    pub fn new(templates: Vec<InvoiceTemplate>) -> Self {
        Self { templates }
    }

    pub fn templates(&self) -> &[InvoiceTemplate] {
        &self.templates
    }

    pub fn get(&self, template_id: &str) -> Option<&InvoiceTemplate> {
        self.templates.iter().find(|t| t.template_id == template_id)
    }

    fn validate(form: &TemplateForm) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if form.name.trim().is_empty() {
            errors.add("name", "Template name is required");
        }
        if form.fields.is_empty() {
            errors.add("fields", "A template needs at least one field");
        }
        errors.into_result()
    }

    /// Save a new template from the editor form
    pub fn create(
        &mut self,
        form: TemplateForm,
        today: NaiveDate,
    ) -> Result<&InvoiceTemplate, ValidationErrors> {
        Self::validate(&form)?;
        self.templates.push(InvoiceTemplate {
            template_id: short_id("tpl"),
            name: form.name,
            layout: form.layout,
            primary_color: form.primary_color,
            accent_color: form.accent_color,
            font: form.font,
            fields: form.fields,
            is_default: self.templates.is_empty(),
            updated_date: today,
        });
        Ok(self.templates.last().expect("template just pushed"))
    }

    /// Overwrite an existing template from the editor form
    pub fn update(
        &mut self,
        template_id: &str,
        form: TemplateForm,
        today: NaiveDate,
    ) -> Result<(), ValidationErrors> {
        Self::validate(&form)?;
        let mut errors = ValidationErrors::new();
        let Some(template) = self
            .templates
            .iter_mut()
            .find(|t| t.template_id == template_id)
        else {
            errors.add("template_id", "Unknown template id");
            return Err(errors);
        };
        template.name = form.name;
        template.layout = form.layout;
        template.primary_color = form.primary_color;
        template.accent_color = form.accent_color;
        template.font = form.font;
        template.fields = form.fields;
        template.updated_date = today;
        Ok(())
    }

    /// Copy a template under a fresh id with a " (Copy)" name suffix
    ///
    /// The copy never inherits the default flag.
    pub fn duplicate(&mut self, template_id: &str, today: NaiveDate) -> Option<&InvoiceTemplate> {
        let source = self.get(template_id)?;
        let mut copy = source.clone();
        copy.template_id = short_id("tpl");
        copy.name = format!("{} (Copy)", copy.name);
        copy.is_default = false;
        copy.updated_date = today;
        self.templates.push(copy);
        self.templates.last()
    }

    /// Delete a template; the default template is refused
    pub fn delete(&mut self, template_id: &str) -> Result<InvoiceTemplate, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let Some(index) = self
            .templates
            .iter()
            .position(|t| t.template_id == template_id)
        else {
            errors.add("template_id", "Unknown template id");
            return Err(errors);
        };
        if self.templates[index].is_default {
            errors.add("template_id", "The default template cannot be deleted");
            return Err(errors);
        }
        Ok(self.templates.remove(index))
    }

    /// Move the default flag to the given template, clearing all others
    pub fn set_default(&mut self, template_id: &str) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if !self.templates.iter().any(|t| t.template_id == template_id) {
            errors.add("template_id", "Unknown template id");
            return Err(errors);
        }
        for template in &mut self.templates {
            template.is_default = template.template_id == template_id;
        }
        Ok(())
    }
}

/// Filter templates for the listing view
///
/// Case-insensitive substring match on name, AND an optional layout filter.
pub fn filter_templates<'a>(
    templates: &'a [InvoiceTemplate],
    search: &str,
    layout: Option<TemplateLayout>,
) -> Vec<&'a InvoiceTemplate> {
    let needle = search.to_lowercase();
    templates
        .iter()
        .filter(|template| {
            let text_match = needle.is_empty() || template.name.to_lowercase().contains(&needle);
            let layout_match = layout.is_none_or(|l| template.layout == l);
            text_match && layout_match
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldType, mock_template};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn form(name: &str) -> TemplateForm {
        TemplateForm {
            name: name.to_string(),
            layout: TemplateLayout::Compact,
            primary_color: "#222222".to_string(),
            accent_color: "#dddddd".to_string(),
            font: "Helvetica".to_string(),
            fields: vec![TemplateField {
                key: "total".to_string(),
                label: "Total".to_string(),
                field_type: FieldType::Number,
                required: true,
                visible: true,
            }],
        }
    }

    #[test]
    fn test_create_first_template_becomes_default() {
        let mut manager = TemplateManager::default();
        let created = manager.create(form("Minimal"), today()).unwrap();
        assert!(created.is_default);
        let created = manager.create(form("Second"), today()).unwrap();
        assert!(!created.is_default);
    }

    #[test]
    fn test_create_requires_name_and_fields() {
        let mut manager = TemplateManager::default();
        let mut bad = form("  ");
        bad.fields.clear();
        let err = manager.create(bad, today()).unwrap_err();
        assert!(err.get("name").is_some());
        assert!(err.get("fields").is_some());
        assert!(manager.templates().is_empty());
    }

    #[test]
    fn test_update_rewrites_and_stamps() {
        let mut manager = TemplateManager::new(vec![mock_template()]);
        manager.update("tpl-000301", form("Renamed"), today()).unwrap();
        let template = manager.get("tpl-000301").unwrap();
        assert_eq!(template.name, "Renamed");
        assert_eq!(template.layout, TemplateLayout::Compact);
        assert_eq!(template.updated_date, today());
        // default flag survives an edit
        assert!(template.is_default);
    }

    #[test]
    fn test_duplicate_gets_fresh_identity() {
        let mut manager = TemplateManager::new(vec![mock_template()]);
        let copy = manager.duplicate("tpl-000301", today()).unwrap();
        assert_ne!(copy.template_id, "tpl-000301");
        assert_eq!(copy.name, "Standard Clinic (Copy)");
        assert!(!copy.is_default);
        assert_eq!(copy.fields.len(), 2);
        assert_eq!(manager.templates().len(), 2);
    }

    #[test]
    fn test_duplicate_unknown_is_none() {
        let mut manager = TemplateManager::new(vec![mock_template()]);
        assert!(manager.duplicate("tpl-zz", today()).is_none());
        assert_eq!(manager.templates().len(), 1);
    }

    /// The default template is protected; a non-default delete removes
    /// exactly that id
    #[test]
    fn test_delete_rules() {
        let mut manager = TemplateManager::new(vec![mock_template()]);
        manager.duplicate("tpl-000301", today()).unwrap();
        let copy_id = manager.templates()[1].template_id.clone();

        let err = manager.delete("tpl-000301").unwrap_err();
        assert!(err.get("template_id").is_some());
        assert_eq!(manager.templates().len(), 2);

        let removed = manager.delete(&copy_id).unwrap();
        assert_eq!(removed.template_id, copy_id);
        assert_eq!(manager.templates().len(), 1);
        assert_eq!(manager.templates()[0].template_id, "tpl-000301");
    }

    #[test]
    fn test_set_default_is_exclusive() {
        let mut manager = TemplateManager::new(vec![mock_template()]);
        manager.duplicate("tpl-000301", today()).unwrap();
        let copy_id = manager.templates()[1].template_id.clone();
        manager.set_default(&copy_id).unwrap();
        let defaults: Vec<&str> = manager
            .templates()
            .iter()
            .filter(|t| t.is_default)
            .map(|t| t.template_id.as_str())
            .collect();
        assert_eq!(defaults, vec![copy_id.as_str()]);
    }

    #[test]
    fn test_filter_templates() {
        let mut manager = TemplateManager::new(vec![mock_template()]);
        manager.create(form("Compact Billing"), today()).unwrap();

        let by_text = filter_templates(manager.templates(), "compact", None);
        assert_eq!(by_text.len(), 1);
        assert_eq!(by_text[0].name, "Compact Billing");

        let by_layout = filter_templates(manager.templates(), "", Some(TemplateLayout::Standard));
        assert_eq!(by_layout.len(), 1);
        assert_eq!(by_layout[0].name, "Standard Clinic");

        let combined = filter_templates(
            manager.templates(),
            "clinic",
            Some(TemplateLayout::Compact),
        );
        assert!(combined.is_empty());
    }
}
