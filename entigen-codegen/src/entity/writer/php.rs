use super::{EntityWriterContext, write_doc_comment};
use crate::{Field, FieldKind, FieldType, GeneratedEntity, RelationField, ScalarField};

pub(crate) fn write_entity(entity: &GeneratedEntity, context: &EntityWriterContext) -> String {
    let mut lines = vec!["<?php".to_owned()];
    write_doc_comment(&mut lines, "//");
    lines.push(format!("namespace {};", context.namespace));
    lines.push(String::new());
    lines.push("use Doctrine\\ORM\\Mapping as ORM;".to_owned());
    lines.push(String::new());
    lines.push("#[ORM\\Entity]".to_owned());
    lines.push(format!("#[ORM\\Table(name: '{}')]", entity.table_name));
    lines.push(format!("class {}", entity.class_name));
    lines.push("{".to_owned());

    let mut blocks: Vec<String> = entity.fields.iter().map(gen_property).collect();
    blocks.push("    public function __construct() {}".to_owned());
    blocks.extend(
        entity
            .fields
            .iter()
            .map(|field| gen_accessors(field, context.fluent_setters)),
    );
    lines.push(blocks.join("\n\n"));
    lines.push("}".to_owned());

    let mut content = lines.join("\n");
    content.push('\n');
    content
}

fn gen_property(field: &Field) -> String {
    let mut lines = Vec::new();
    match &field.kind {
        FieldKind::Scalar(scalar) => {
            let orm_type = scalar.column_kind.as_str();
            if scalar.is_identity() {
                lines.push("    #[ORM\\Id]".to_owned());
                lines.push(format!("    #[ORM\\Column(type: '{orm_type}')]"));
                if scalar.is_generated() {
                    lines.push("    #[ORM\\GeneratedValue]".to_owned());
                }
            } else {
                lines.push("    #[ORM\\Column(".to_owned());
                lines.push(format!("        type: '{orm_type}',"));
                if let Some(length) = scalar.length {
                    lines.push(format!("        length: {length},"));
                }
                if scalar.nullable {
                    lines.push("        nullable: true,".to_owned());
                }
                lines.push("    )]".to_owned());
            }
            if scalar.field_type == FieldType::Binary {
                lines.push("    /** @var resource|null */".to_owned());
            }
            let php_type = scalar_type(scalar);
            if has_null_default(scalar) {
                lines.push(format!("    private {php_type} ${} = null;", field.name));
            } else {
                lines.push(format!("    private {php_type} ${};", field.name));
            }
        }
        FieldKind::Relation(relation) => {
            lines.push(format!(
                "    #[ORM\\ManyToOne(targetEntity: {}::class)]",
                relation.target_class
            ));
            lines.push("    #[ORM\\JoinColumn(".to_owned());
            lines.push(format!("        name: '{}',", relation.local_column));
            lines.push(format!(
                "        referencedColumnName: '{}'",
                relation.referenced_column
            ));
            lines.push("    )]".to_owned());
            lines.push(format!(
                "    private {} ${} = null;",
                relation_type(relation),
                field.name
            ));
        }
    }
    lines.join("\n")
}

fn gen_accessors(field: &Field, fluent_setters: bool) -> String {
    let php_type = match &field.kind {
        FieldKind::Scalar(scalar) => scalar_type(scalar),
        FieldKind::Relation(relation) => relation_type(relation),
    };
    let name = &field.name;
    let (setter_return, setter_tail) = if fluent_setters {
        ("self", "\n        return $this;")
    } else {
        ("void", "")
    };

    let mut content = String::new();
    content.push_str(&format!(
        "    public function {}(): {php_type}\n    {{\n        return $this->{name};\n    }}\n\n",
        field.getter_name()
    ));
    content.push_str(&format!(
        "    public function {}({php_type} ${name}): {setter_return}\n    {{\n        $this->{name} = ${name};{setter_tail}\n    }}",
        field.setter_name()
    ));
    content
}

fn php_type(field_type: FieldType) -> &'static str {
    match field_type {
        FieldType::Integer => "int",
        FieldType::String => "string",
        FieldType::Boolean => "bool",
        FieldType::DateTime => "\\DateTime",
        FieldType::Float => "float",
        FieldType::Array => "array",
        FieldType::Object => "object",
        FieldType::Binary | FieldType::Mixed => "mixed",
    }
}

/// `mixed` already admits null and cannot take the `?` prefix.
fn scalar_type(scalar: &ScalarField) -> String {
    let php_type = php_type(scalar.field_type);
    if php_type != "mixed" && (scalar.nullable || scalar.is_generated()) {
        format!("?{php_type}")
    } else {
        php_type.to_owned()
    }
}

fn has_null_default(scalar: &ScalarField) -> bool {
    scalar.nullable || scalar.is_generated() || php_type(scalar.field_type) == "mixed"
}

fn relation_type(relation: &RelationField) -> String {
    format!("?{}", relation.target_class)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ColumnDescriptor, ColumnKind, DuplicateRelationPolicy, EntityTransformer, OutputTarget,
        TableDescriptor,
    };
    use pretty_assertions::assert_eq;

    fn render(table: &TableDescriptor, fluent_setters: bool) -> String {
        let entity =
            EntityTransformer::transform_table(table, DuplicateRelationPolicy::Suffix).unwrap();
        let context = EntityWriterContext::new(
            OutputTarget::Php,
            "App\\Entity".to_owned(),
            fluent_setters,
        );
        write_entity(&entity, &context)
    }

    #[test]
    fn test_write_entity() {
        let table = TableDescriptor::new("blog_posts")
            .primary_key("id")
            .column(ColumnDescriptor::new("id", ColumnKind::Integer).autoincrement())
            .column(ColumnDescriptor::new("title", ColumnKind::String).length(120))
            .column(ColumnDescriptor::new("published_at", ColumnKind::DateTime).nullable())
            .column(ColumnDescriptor::new("user_id", ColumnKind::Integer))
            .foreign_key("user_id", "users", "id");

        let expected = [
            "<?php".to_owned(),
            format!("// Generated by entigen-codegen {}", env!("CARGO_PKG_VERSION")),
            r#"namespace App\Entity;

use Doctrine\ORM\Mapping as ORM;

#[ORM\Entity]
#[ORM\Table(name: 'blog_posts')]
class BlogPosts
{
    #[ORM\Id]
    #[ORM\Column(type: 'integer')]
    #[ORM\GeneratedValue]
    private ?int $id = null;

    #[ORM\Column(
        type: 'string',
        length: 120,
    )]
    private string $title;

    #[ORM\Column(
        type: 'datetime',
        nullable: true,
    )]
    private ?\DateTime $publishedAt = null;

    #[ORM\Column(
        type: 'integer',
    )]
    private int $userId;

    #[ORM\ManyToOne(targetEntity: Users::class)]
    #[ORM\JoinColumn(
        name: 'user_id',
        referencedColumnName: 'id'
    )]
    private ?Users $users = null;

    public function __construct() {}

    public function getId(): ?int
    {
        return $this->id;
    }

    public function setId(?int $id): self
    {
        $this->id = $id;
        return $this;
    }

    public function getTitle(): string
    {
        return $this->title;
    }

    public function setTitle(string $title): self
    {
        $this->title = $title;
        return $this;
    }

    public function getPublishedAt(): ?\DateTime
    {
        return $this->publishedAt;
    }

    public function setPublishedAt(?\DateTime $publishedAt): self
    {
        $this->publishedAt = $publishedAt;
        return $this;
    }

    public function getUserId(): int
    {
        return $this->userId;
    }

    public function setUserId(int $userId): self
    {
        $this->userId = $userId;
        return $this;
    }

    public function getUsers(): ?Users
    {
        return $this->users;
    }

    public function setUsers(?Users $users): self
    {
        $this->users = $users;
        return $this;
    }
}
"#
            .to_owned(),
        ]
        .join("\n");

        assert_eq!(render(&table, true), expected);
    }

    #[test]
    fn test_identity_without_generated_value() {
        let table = TableDescriptor::new("countries")
            .primary_key("code")
            .column(ColumnDescriptor::new("code", ColumnKind::String).length(2));
        let content = render(&table, true);

        assert!(content.contains("    #[ORM\\Id]\n    #[ORM\\Column(type: 'string')]\n    private string $code;"));
        assert!(!content.contains("GeneratedValue"));
        assert!(!content.contains("length:"));
    }

    #[test]
    fn test_nullable_marker() {
        let table = TableDescriptor::new("profiles")
            .column(ColumnDescriptor::new("bio", ColumnKind::Text).nullable())
            .column(ColumnDescriptor::new("nickname", ColumnKind::String));
        let content = render(&table, true);

        assert_eq!(content.matches("nullable: true").count(), 1);
        assert!(content.contains("        nullable: true,\n    )]\n    private ?string $bio = null;"));
        assert!(content.contains("    private string $nickname;"));
    }

    #[test]
    fn test_fallback_types() {
        let table = TableDescriptor::new("places")
            .column(ColumnDescriptor::new("area", "geometry".parse().unwrap()))
            .column(ColumnDescriptor::new("photo", ColumnKind::Blob).nullable());
        let content = render(&table, true);

        assert!(content.contains("        type: 'geometry',\n    )]\n    private mixed $area = null;"));
        assert!(content.contains("    /** @var resource|null */\n    private mixed $photo = null;"));
        assert!(content.contains("public function setArea(mixed $area): self"));
    }

    #[test]
    fn test_without_fluent_setters() {
        let table = TableDescriptor::new("tags")
            .column(ColumnDescriptor::new("label", ColumnKind::String))
            .foreign_key("owner_id", "users", "id");
        let content = render(&table, false);

        assert!(!content.contains("return $this;"));
        assert!(!content.contains("): self"));
        assert_eq!(content.matches("): void").count(), 2);
    }
}
