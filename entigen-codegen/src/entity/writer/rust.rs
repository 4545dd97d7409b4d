use super::{EntityWriterContext, OutputFile, write_doc_comment};
use crate::{
    Field, FieldKind, FieldType, GeneratedEntity, ScalarField,
    util::{escape_rust_keyword, sanitize_ident},
};
use heck::ToSnakeCase;
use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};

pub(crate) fn write_entity(entity: &GeneratedEntity, context: &EntityWriterContext) -> String {
    let mut lines = Vec::new();
    write_doc_comment(&mut lines, "//!");
    lines.push(format!(
        "//! Entity `{}` of `{}`, mapped to table `{}`.",
        entity.class_name, context.namespace, entity.table_name
    ));
    lines.push(String::new());
    let code_blocks = vec![
        gen_struct(entity),
        gen_impl(entity, context.fluent_setters),
    ];
    write(&mut lines, code_blocks);
    lines.join("\n")
}

/// `mod.rs` declaring one module per entity file and re-exporting the
/// structs, which is what `super::Target` in relation fields resolves to.
pub(crate) fn write_index_file(
    entities: &[GeneratedEntity],
    context: &EntityWriterContext,
) -> OutputFile {
    let mut lines = Vec::new();
    write_doc_comment(&mut lines, "//!");
    lines.push(format!("//! Entities of `{}`.", context.namespace));
    lines.push(String::new());
    let code_blocks = entities.iter().map(gen_mod).collect();
    write(&mut lines, code_blocks);
    OutputFile {
        name: "mod.rs".to_owned(),
        content: lines.join("\n"),
    }
}

fn write(lines: &mut Vec<String>, code_blocks: Vec<TokenStream>) {
    lines.extend(
        code_blocks
            .into_iter()
            .map(|code_block| code_block.to_string())
            .collect::<Vec<_>>(),
    );
}

fn gen_mod(entity: &GeneratedEntity) -> TokenStream {
    let file_name = format!("{}.rs", entity.class_name);
    let module_name = module_ident(&entity.class_name);
    let struct_name = struct_ident(&entity.class_name);
    quote! {
        #[path = #file_name]
        mod #module_name;
        pub use #module_name::#struct_name;
    }
}

fn gen_struct(entity: &GeneratedEntity) -> TokenStream {
    let struct_name = struct_ident(&entity.class_name);
    let struct_doc = format!(" Row of table `{}`.", entity.table_name);
    let fields = entity.fields.iter().map(|field| {
        let doc = format!(" {}", field_doc(field));
        let name = field_ident(field);
        let ty = field_type(field);
        quote! {
            #[doc = #doc]
            #name: #ty
        }
    });
    quote! {
        #[doc = #struct_doc]
        #[derive(Clone, Debug, Default, PartialEq)]
        pub struct #struct_name {
            #(#fields,)*
        }
    }
}

fn gen_impl(entity: &GeneratedEntity, fluent_setters: bool) -> TokenStream {
    let struct_name = struct_ident(&entity.class_name);
    let table_name = entity.table_name.as_str();
    let accessors = entity
        .fields
        .iter()
        .map(|field| gen_accessors(field, fluent_setters));
    quote! {
        impl #struct_name {
            pub const TABLE_NAME: &'static str = #table_name;

            pub fn new() -> Self {
                Self::default()
            }

            #(#accessors)*
        }
    }
}

fn gen_accessors(field: &Field, fluent_setters: bool) -> TokenStream {
    let name = field_ident(field);
    let setter = format_ident!("set_{}", sanitize_ident(&field.name.to_snake_case()));
    let (getter_ty, getter_body, setter_ty, assign) = match &field.kind {
        FieldKind::Relation(relation) => {
            let target = struct_ident(&relation.target_class);
            (
                quote! { Option<&super::#target> },
                quote! { self.#name.as_deref() },
                quote! { Option<super::#target> },
                quote! { self.#name = #name.map(Box::new); },
            )
        }
        FieldKind::Scalar(scalar) => {
            let inner = rs_type(scalar.field_type);
            if is_optional(scalar) {
                (
                    quote! { Option<&#inner> },
                    quote! { self.#name.as_ref() },
                    quote! { Option<#inner> },
                    quote! { self.#name = #name; },
                )
            } else {
                (
                    quote! { &#inner },
                    quote! { &self.#name },
                    quote! { #inner },
                    quote! { self.#name = #name; },
                )
            }
        }
    };
    let setter_fn = if fluent_setters {
        quote! {
            pub fn #setter(&mut self, #name: #setter_ty) -> &mut Self {
                #assign
                self
            }
        }
    } else {
        quote! {
            pub fn #setter(&mut self, #name: #setter_ty) {
                #assign
            }
        }
    };
    quote! {
        pub fn #name(&self) -> #getter_ty {
            #getter_body
        }

        #setter_fn
    }
}

/// Table and column names may hold characters no Rust identifier accepts.
/// Every identifier below goes through [`sanitize_ident`] first.
fn rust_ident(name: &str) -> Ident {
    format_ident!("{}", escape_rust_keyword(sanitize_ident(name)))
}

fn field_ident(field: &Field) -> Ident {
    rust_ident(&field.name.to_snake_case())
}

fn struct_ident(class_name: &str) -> Ident {
    rust_ident(class_name)
}

fn module_ident(class_name: &str) -> Ident {
    rust_ident(&class_name.to_snake_case())
}

fn field_type(field: &Field) -> TokenStream {
    match &field.kind {
        FieldKind::Relation(relation) => {
            let target = struct_ident(&relation.target_class);
            quote! { Option<Box<super::#target>> }
        }
        FieldKind::Scalar(scalar) => {
            let inner = rs_type(scalar.field_type);
            if is_optional(scalar) {
                quote! { Option<#inner> }
            } else {
                inner
            }
        }
    }
}

fn rs_type(field_type: FieldType) -> TokenStream {
    match field_type {
        FieldType::Integer => quote! { i64 },
        FieldType::String => quote! { String },
        FieldType::Boolean => quote! { bool },
        FieldType::DateTime => quote! { chrono::NaiveDateTime },
        FieldType::Float => quote! { f64 },
        FieldType::Binary => quote! { Vec<u8> },
        FieldType::Array | FieldType::Object | FieldType::Mixed => quote! { serde_json::Value },
    }
}

/// Generated keys are unset until the row is inserted.
fn is_optional(scalar: &ScalarField) -> bool {
    scalar.nullable || scalar.is_generated()
}

fn field_doc(field: &Field) -> String {
    match &field.kind {
        FieldKind::Scalar(scalar) => {
            let mut parts = vec![format!("Column `{}` ({})", scalar.column, scalar.column_kind)];
            if scalar.is_identity() {
                parts.push("primary key".to_owned());
            }
            if scalar.is_generated() {
                parts.push("auto-generated".to_owned());
            }
            if let Some(length) = scalar.length {
                parts.push(format!("length {length}"));
            }
            if scalar.nullable {
                parts.push("nullable".to_owned());
            }
            format!("{}.", parts.join(", "))
        }
        FieldKind::Relation(relation) => format!(
            "Many-to-one: `{}` references `{}.{}`.",
            relation.local_column, relation.target_table, relation.referenced_column
        ),
    }
}
