use crate::{
    EntityWriter, Error, Field, FieldKind, FieldType, GeneratedEntity, Identity, RelationField,
    ScalarField, TableDescriptor, class_name, property_name,
};
use std::{
    collections::{HashMap, HashSet},
    str::FromStr,
};
use tracing::warn;

/// What to do when two names derive the same identifier: two fields of one
/// entity (e.g. two foreign keys referencing the same table), or two tables
/// mapping to the same class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DuplicateRelationPolicy {
    /// Keep the first name, number the later ones (`users`, `users2`, ...)
    #[default]
    Suffix,
    /// Abort with [`Error::AmbiguousProperty`] or [`Error::AmbiguousEntity`]
    Error,
}

impl FromStr for DuplicateRelationPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "suffix" => Self::Suffix,
            "error" => Self::Error,
            v => {
                return Err(Error::TransformError(format!(
                    "Unsupported duplicate relation policy '{v}'"
                )));
            }
        })
    }
}

#[derive(Clone, Debug)]
pub struct EntityTransformer;

impl EntityTransformer {
    pub fn transform(
        tables: &[TableDescriptor],
        policy: DuplicateRelationPolicy,
    ) -> Result<EntityWriter, Error> {
        // Class names double as file names, so they are compared ignoring case
        let mut classes = UniqueNames::new(policy, true);
        let mut entity_names = Vec::with_capacity(tables.len());
        let mut targets = HashMap::new();
        for table in tables.iter() {
            let derived = class_name(&table.name);
            let Some(unique) = classes.claim(&derived) else {
                return Err(Error::AmbiguousEntity {
                    table: table.name.clone(),
                    class_name: derived,
                });
            };
            if unique != derived {
                warn!(
                    "Class `{}` is already generated, using `{}` for table `{}`",
                    derived, unique, table.name
                );
            }
            targets
                .entry(table.name.as_str())
                .or_insert_with(|| unique.clone());
            entity_names.push(unique);
        }

        let entities = tables
            .iter()
            .zip(entity_names)
            .map(|(table, name)| Self::transform_named(table, name, policy, &targets))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(EntityWriter { entities })
    }

    pub fn transform_table(
        table: &TableDescriptor,
        policy: DuplicateRelationPolicy,
    ) -> Result<GeneratedEntity, Error> {
        Self::transform_named(table, class_name(&table.name), policy, &HashMap::new())
    }

    fn transform_named(
        table: &TableDescriptor,
        entity_name: String,
        policy: DuplicateRelationPolicy,
        targets: &HashMap<&str, String>,
    ) -> Result<GeneratedEntity, Error> {
        let mut names = UniqueNames::new(policy, false);
        let mut fields = Vec::with_capacity(table.columns.len() + table.foreign_keys.len());

        for column in table.columns.iter() {
            let identity = table.is_primary_key(&column.name).then_some(Identity {
                generated: column.autoincrement,
            });
            let (length, nullable) = match identity {
                Some(_) => (None, false),
                None => (column.length, column.nullable),
            };
            fields.push(Field {
                name: claim_property(&mut names, &table.name, property_name(&column.name))?,
                kind: FieldKind::Scalar(ScalarField {
                    column: column.name.clone(),
                    column_kind: column.kind.clone(),
                    field_type: FieldType::from(&column.kind),
                    identity,
                    length,
                    nullable,
                }),
            });
        }

        for fk in table.foreign_keys.iter() {
            let target_class = match targets.get(fk.referenced_table.as_str()) {
                Some(target) => target.clone(),
                None => class_name(&fk.referenced_table),
            };
            fields.push(Field {
                name: claim_property(&mut names, &table.name, property_name(&fk.referenced_table))?,
                kind: FieldKind::Relation(RelationField {
                    target_table: fk.referenced_table.clone(),
                    target_class,
                    local_column: fk.local_column.clone(),
                    referenced_column: fk.referenced_column.clone(),
                }),
            });
        }

        Ok(GeneratedEntity {
            class_name: entity_name,
            table_name: table.name.clone(),
            fields,
        })
    }
}

fn claim_property(names: &mut UniqueNames, table: &str, name: String) -> Result<String, Error> {
    let Some(unique) = names.claim(&name) else {
        return Err(Error::AmbiguousProperty {
            table: table.to_owned(),
            property: name,
        });
    };
    if unique != name {
        warn!(
            "Property `{}` already exists on table `{}`, using `{}`",
            name, table, unique
        );
    }
    Ok(unique)
}

/// Names handed out so far within one scope.
struct UniqueNames {
    policy: DuplicateRelationPolicy,
    ignore_case: bool,
    taken: HashSet<String>,
}

impl UniqueNames {
    fn new(policy: DuplicateRelationPolicy, ignore_case: bool) -> Self {
        Self {
            policy,
            ignore_case,
            taken: HashSet::new(),
        }
    }

    fn key(&self, name: &str) -> String {
        if self.ignore_case {
            name.to_lowercase()
        } else {
            name.to_owned()
        }
    }

    /// `name` itself when free, a numbered variant under
    /// [`DuplicateRelationPolicy::Suffix`], `None` under
    /// [`DuplicateRelationPolicy::Error`].
    fn claim(&mut self, name: &str) -> Option<String> {
        let key = self.key(name);
        if self.taken.insert(key) {
            return Some(name.to_owned());
        }
        match self.policy {
            DuplicateRelationPolicy::Error => None,
            DuplicateRelationPolicy::Suffix => {
                let renamed = (2..)
                    .map(|n| format!("{name}{n}"))
                    .find(|candidate| !self.taken.contains(&self.key(candidate)))?;
                let key = self.key(&renamed);
                self.taken.insert(key);
                Some(renamed)
            }
        }
    }
}
