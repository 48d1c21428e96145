//! Entity descriptors: the editable-field set that drives SQL, DDL, forms, and routes.

/// One editable column. Every editable field is text; the admin is form-backed.
#[derive(Clone, Copy, Debug)]
pub struct FieldDef {
    /// Column name, also used as the form field name.
    pub name: &'static str,
    /// Human label for table headers and form rows.
    pub label: &'static str,
    /// Required fields must be non-empty after trimming.
    pub required: bool,
    /// Maximum accepted length in characters.
    pub max_length: usize,
}

/// A CRUD-administered entity: one table, a `BIGSERIAL` primary key named `id`,
/// and a fixed set of editable text columns. Handlers, queries, and views never
/// name columns directly; they read them from here.
#[derive(Clone, Copy, Debug)]
pub struct EntityDef {
    /// Singular display name.
    pub name: &'static str,
    /// Plural display name for the list page.
    pub plural: &'static str,
    /// Table name (trusted: descriptors are compiled in, never user input).
    pub table: &'static str,
    pub fields: &'static [FieldDef],
}

impl EntityDef {
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Field whose value labels a record in headings and delete confirmations.
    /// Convention: the first editable field.
    pub fn label_field(&self) -> &FieldDef {
        &self.fields[0]
    }
}

/// The one entity this service administers.
pub const STUDENT: EntityDef = EntityDef {
    name: "Student",
    plural: "Students",
    table: "students",
    fields: &[
        FieldDef {
            name: "name",
            label: "Name",
            required: true,
            max_length: 200,
        },
        FieldDef {
            name: "identity_number",
            label: "Identity number",
            required: true,
            max_length: 200,
        },
    ],
};
