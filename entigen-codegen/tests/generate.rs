use entigen_codegen::{
    ColumnDescriptor, ColumnKind, DuplicateRelationPolicy, EntityTransformer, EntityWriterContext,
    Error, OutputTarget, TableDescriptor, generate,
};
use pretty_assertions::assert_eq;
use std::{error::Error as StdError, fs};

fn schema() -> Vec<TableDescriptor> {
    vec![
        TableDescriptor::new("users")
            .primary_key("id")
            .column(ColumnDescriptor::new("id", ColumnKind::Integer).autoincrement())
            .column(ColumnDescriptor::new("email", ColumnKind::String).length(180))
            .column(ColumnDescriptor::new("created_at", ColumnKind::DateTime)),
        TableDescriptor::new("user_roles")
            .primary_key("user_id")
            .primary_key("role")
            .column(ColumnDescriptor::new("user_id", ColumnKind::Integer))
            .column(ColumnDescriptor::new("role", ColumnKind::String).length(32))
            .foreign_key("user_id", "users", "id"),
        TableDescriptor::new("productos")
            .primary_key("id")
            .column(ColumnDescriptor::new("id", ColumnKind::Integer).autoincrement())
            .column(ColumnDescriptor::new("precio", ColumnKind::Decimal))
            .column(ColumnDescriptor::new("descripcion", ColumnKind::Text).nullable()),
    ]
}

#[test]
fn test_generate_writes_one_file_per_table() -> Result<(), Box<dyn StdError>> {
    let dir = tempfile::tempdir()?;
    let output_dir = dir.path().join("src").join("Entity");

    let entities = generate(&schema(), "App\\Entity", &output_dir)?;

    let names: Vec<_> = entities.iter().map(|entity| entity.class_name()).collect();
    assert_eq!(names, vec!["Users", "UserRoles", "Productos"]);

    let mut files: Vec<_> = fs::read_dir(&output_dir)?
        .map(|entry| entry.map(|entry| entry.file_name().to_string_lossy().into_owned()))
        .collect::<Result<_, _>>()?;
    files.sort();
    assert_eq!(files, vec!["Productos.php", "UserRoles.php", "Users.php"]);

    let user_roles = fs::read_to_string(output_dir.join("UserRoles.php"))?;
    assert!(user_roles.contains("namespace App\\Entity;"));
    assert!(user_roles.contains("#[ORM\\Table(name: 'user_roles')]"));
    assert!(user_roles.contains("#[ORM\\ManyToOne(targetEntity: Users::class)]"));
    assert!(user_roles.contains("private ?Users $users = null;"));
    assert!(!user_roles.contains("GeneratedValue"));

    Ok(())
}

#[test]
fn test_generate_is_idempotent() -> Result<(), Box<dyn StdError>> {
    let dir = tempfile::tempdir()?;

    for target in [OutputTarget::Php, OutputTarget::Rust] {
        let context = EntityWriterContext::new(target, "Entity".to_owned(), true);

        let first = EntityTransformer::transform(&schema(), DuplicateRelationPolicy::Suffix)?
            .generate(&context)
            .write_to(dir.path())?;
        let first_contents = first
            .iter()
            .map(fs::read)
            .collect::<Result<Vec<_>, _>>()?;

        let second = EntityTransformer::transform(&schema(), DuplicateRelationPolicy::Suffix)?
            .generate(&context)
            .write_to(dir.path())?;
        let second_contents = second
            .iter()
            .map(fs::read)
            .collect::<Result<Vec<_>, _>>()?;

        assert_eq!(first, second);
        assert_eq!(first_contents, second_contents);
    }

    Ok(())
}

#[test]
fn test_generate_overwrites_existing_files() -> Result<(), Box<dyn StdError>> {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("Users.php"), "<?php // edited by hand\n")?;

    generate(&schema(), "Entity", dir.path())?;

    let users = fs::read_to_string(dir.path().join("Users.php"))?;
    assert!(!users.contains("edited by hand"));
    assert!(users.contains("class Users"));

    Ok(())
}

#[test]
fn test_tables_with_same_class_name_keep_both_files() -> Result<(), Box<dyn StdError>> {
    let dir = tempfile::tempdir()?;
    let tables = vec![
        TableDescriptor::new("user_roles")
            .column(ColumnDescriptor::new("role", ColumnKind::String)),
        TableDescriptor::new("userRoles")
            .column(ColumnDescriptor::new("role", ColumnKind::String)),
    ];

    let entities = generate(&tables, "Entity", dir.path())?;

    let names: Vec<_> = entities.iter().map(|entity| entity.class_name()).collect();
    assert_eq!(names, vec!["UserRoles", "UserRoles2"]);

    let mut files: Vec<_> = fs::read_dir(dir.path())?
        .map(|entry| entry.map(|entry| entry.file_name().to_string_lossy().into_owned()))
        .collect::<Result<_, _>>()?;
    files.sort();
    assert_eq!(files, vec!["UserRoles.php", "UserRoles2.php"]);

    let second = fs::read_to_string(dir.path().join("UserRoles2.php"))?;
    assert!(second.contains("#[ORM\\Table(name: 'userRoles')]"));
    assert!(second.contains("class UserRoles2"));

    let result = EntityTransformer::transform(&tables, DuplicateRelationPolicy::Error);
    assert!(matches!(result, Err(Error::AmbiguousEntity { .. })));

    Ok(())
}

#[test]
fn test_uncreatable_directory() -> Result<(), Box<dyn StdError>> {
    let dir = tempfile::tempdir()?;
    let blocker = dir.path().join("Entity");
    fs::write(&blocker, "not a directory")?;

    let result = generate(&schema(), "Entity", blocker.join("nested"));
    assert!(matches!(result, Err(Error::DirectoryCreation { .. })));

    let result = generate(&schema(), "Entity", &blocker);
    assert!(matches!(result, Err(Error::DirectoryCreation { .. })));

    let entries: Vec<_> = fs::read_dir(dir.path())?.collect::<Result<_, _>>()?;
    assert_eq!(entries.len(), 1);
    assert_eq!(fs::read_to_string(&blocker)?, "not a directory");

    Ok(())
}

#[test]
fn test_snapshot_round_trip_generates_same_entities() -> Result<(), Box<dyn StdError>> {
    let json = r#"[
        {
            "name": "users",
            "columns": [
                { "name": "id", "type": "integer", "autoincrement": true },
                { "name": "email", "type": "string", "length": 180 },
                { "name": "created_at", "type": "datetime" }
            ],
            "primary_key": ["id"]
        },
        {
            "name": "user_roles",
            "columns": [
                { "name": "user_id", "type": "integer" },
                { "name": "role", "type": "string", "length": 32 }
            ],
            "foreign_keys": [
                { "local_column": "user_id", "referenced_table": "users", "referenced_column": "id" }
            ],
            "primary_key": ["user_id", "role"]
        },
        {
            "name": "productos",
            "columns": [
                { "name": "id", "type": "integer", "autoincrement": true },
                { "name": "precio", "type": "decimal" },
                { "name": "descripcion", "type": "text", "nullable": true }
            ],
            "primary_key": ["id"]
        }
    ]"#;
    let tables: Vec<TableDescriptor> = serde_json::from_str(json)?;
    assert_eq!(tables, schema());

    let encoded = serde_json::to_string(&tables)?;
    let decoded: Vec<TableDescriptor> = serde_json::from_str(&encoded)?;
    assert_eq!(decoded, tables);

    Ok(())
}
