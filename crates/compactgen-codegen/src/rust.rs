//! Rust module generation for compact types.
//!
//! Every non-external type becomes one module file holding a plain struct and
//! a unit `<Name>Serializer` implementing the runtime's `CompactSerializer`.
//! A `registry.rs` file registers all of them, and an optional `mod.rs` ties
//! the files together.
//!
//! Output is built with `quote`, checked by parsing it back with `syn`, and
//! formatted with `prettyplease`. Files contain no `use` items or inner
//! attributes, so they can also be pulled in with `include!`.

use crate::config::RustConfig;
use crate::error::{EmissionError, EmissionResult};
use crate::naming::{rust_field_name, to_module_name, to_snake_case};
use crate::output::GeneratedUnit;
use compactgen_core::{
    CompiledSchema, DefaultValue, FieldType, Fingerprint, PrimitiveKind, ResolvedField,
    ResolvedType, TypeId,
};
use proc_macro2::{Ident, Literal, TokenStream};
use quote::{format_ident, quote};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// First line of every generated Rust file.
pub const GENERATED_HEADER: &str = "// @generated by compactgen. Do not edit.\n\n";

/// Module names the generator writes itself.
const RESERVED_MODULES: &[&str] = &["registry"];

/// Above this many fields the constructor needs `too_many_arguments` allowed.
const CLIPPY_MAX_ARGUMENTS: usize = 7;

/// Generate one module per emitted type, then `registry.rs` and (optionally)
/// `mod.rs`.
pub fn generate_rust(
    compiled: &CompiledSchema,
    config: &RustConfig,
) -> EmissionResult<Vec<GeneratedUnit>> {
    let runtime = syn::parse_str::<syn::Path>(&config.runtime_crate).map_err(|err| {
        EmissionError::Config(format!(
            "rust.runtime_crate `{}` is not a path: {err}",
            config.runtime_crate
        ))
    })?;
    let modules = module_names(compiled)?;
    let ctx = RustContext {
        compiled,
        config,
        runtime: quote!(#runtime),
        modules,
    };

    let mut units = Vec::new();
    let mut registrations = Vec::new();
    for identity in compiled.identities() {
        let def = compiled.get(identity.id);
        let module = &ctx.modules[&identity.id];
        let tokens = RustType::new(&ctx, def, identity.fingerprint)?.render()?;
        units.push(GeneratedUnit::new(
            format!("{module}.rs"),
            format_file(&def.qualified_name(), tokens)?,
        ));
        debug!(type_name = %def.name, module = %module, "rendered rust module");

        let module = format_ident!("{}", module);
        let serializer = serializer_ident(def);
        registrations.push(quote!(registry.register(super::#module::#serializer)?;));
    }

    units.push(GeneratedUnit::new(
        "registry.rs",
        format_file("registry", render_registry(&ctx.runtime, &registrations))?,
    ));

    if config.emit_mod {
        let mods = units
            .iter()
            .filter_map(|unit| unit.relative_path.file_stem())
            .filter_map(|stem| stem.to_str())
            .map(|stem| format_ident!("{}", stem))
            .collect::<Vec<_>>();
        let tokens = quote! {
            #(pub mod #mods;)*
            pub use registry::register_all;
        };
        units.push(GeneratedUnit::new("mod.rs", format_file("mod", tokens)?));
    }

    Ok(units)
}

/// `point` for `com.example.Point`, or `com_example_point` when another
/// emitted type has the same snake-case name.
fn module_names(compiled: &CompiledSchema) -> EmissionResult<HashMap<TypeId, String>> {
    let emitted: Vec<(TypeId, &ResolvedType)> = compiled
        .identities()
        .iter()
        .map(|identity| (identity.id, compiled.get(identity.id)))
        .collect();

    let mut counts: HashMap<String, usize> = HashMap::new();
    for (_, def) in &emitted {
        *counts.entry(plain_module_name(def)).or_default() += 1;
    }

    let mut names = HashMap::new();
    let mut taken = HashSet::new();
    for (id, def) in emitted {
        let plain = plain_module_name(def);
        let name = match def.name.namespace() {
            Some(namespace) if counts[&plain] > 1 => {
                format!("{}_{plain}", to_module_name(namespace))
            }
            _ => plain,
        };
        if syn::parse_str::<Ident>(&name).is_err() {
            return Err(EmissionError::render(
                def.qualified_name(),
                format!("`{name}` is not a valid Rust module name"),
            ));
        }
        if !taken.insert(name.clone()) {
            return Err(EmissionError::render(
                def.qualified_name(),
                format!("module name `{name}` is already used by another type"),
            ));
        }
        names.insert(id, name);
    }
    Ok(names)
}

fn plain_module_name(def: &ResolvedType) -> String {
    let snake = to_snake_case(def.name.name());
    if RESERVED_MODULES.contains(&snake.as_str()) || is_keyword(&snake) {
        format!("{snake}_type")
    } else {
        snake
    }
}

fn is_keyword(name: &str) -> bool {
    syn::parse_str::<Ident>(name).is_err() && syn::parse_str::<Ident>(&format!("{name}_")).is_ok()
}

fn serializer_ident(def: &ResolvedType) -> Ident {
    format_ident!("{}Serializer", def.name.name())
}

fn render_registry(runtime: &TokenStream, registrations: &[TokenStream]) -> TokenStream {
    let param = if registrations.is_empty() {
        format_ident!("_registry")
    } else {
        format_ident!("registry")
    };
    quote! {
        /// Registers the serializer of every generated type.
        pub fn register_all(#param: &mut #runtime::SerializerRegistry) -> #runtime::CompactResult<()> {
            #(#registrations)*
            Ok(())
        }
    }
}

fn format_file(type_name: &str, tokens: TokenStream) -> EmissionResult<String> {
    let file = syn::parse2::<syn::File>(tokens).map_err(|err| {
        EmissionError::render(type_name, format!("generated code does not parse: {err}"))
    })?;
    Ok(format!("{GENERATED_HEADER}{}", prettyplease::unparse(&file)))
}

struct RustContext<'a> {
    compiled: &'a CompiledSchema,
    config: &'a RustConfig,
    runtime: TokenStream,
    modules: HashMap<TypeId, String>,
}

impl RustContext<'_> {
    /// Path of a referenced compact type, relative to a sibling module.
    fn compact_type(&self, id: TypeId) -> EmissionResult<TokenStream> {
        let target = self.compiled.get(id);
        if target.external {
            return self.external_type(target);
        }
        let module = self
            .modules
            .get(&id)
            .ok_or_else(|| EmissionError::render(target.qualified_name(), "type has no module"))?;
        let module = format_ident!("{}", module);
        let name = syn::parse_str::<Ident>(target.name.name()).map_err(|_| {
            EmissionError::render(target.qualified_name(), "type name is not a valid Rust type name")
        })?;
        Ok(quote!(super::#module::#name))
    }

    fn external_type(&self, target: &ResolvedType) -> EmissionResult<TokenStream> {
        let qualified = target.qualified_name();
        let path = external_path(self.config, &qualified);
        let ty = syn::parse_str::<syn::Type>(&path).map_err(|err| {
            EmissionError::Config(format!(
                "rust path `{path}` for external type `{qualified}` is not a type: {err}"
            ))
        })?;
        Ok(quote!(#ty))
    }

    fn kind_type(&self, kind: PrimitiveKind) -> TokenStream {
        let rt = &self.runtime;
        match kind {
            PrimitiveKind::Boolean => quote!(::core::primitive::bool),
            PrimitiveKind::Int8 => quote!(::core::primitive::i8),
            PrimitiveKind::Int16 => quote!(::core::primitive::i16),
            PrimitiveKind::Int32 => quote!(::core::primitive::i32),
            PrimitiveKind::Int64 => quote!(::core::primitive::i64),
            PrimitiveKind::Float32 => quote!(::core::primitive::f32),
            PrimitiveKind::Float64 => quote!(::core::primitive::f64),
            PrimitiveKind::String => quote!(::std::string::String),
            PrimitiveKind::Date => quote!(#rt::time::Date),
            PrimitiveKind::Time => quote!(#rt::time::Time),
            PrimitiveKind::Timestamp => quote!(#rt::time::PrimitiveDateTime),
            PrimitiveKind::TimestampWithTimezone => quote!(#rt::time::OffsetDateTime),
        }
    }

    fn field_type(&self, ty: &FieldType<TypeId>) -> EmissionResult<TokenStream> {
        Ok(match ty {
            FieldType::Primitive(kind) => self.kind_type(*kind),
            FieldType::NullablePrimitive(kind) => {
                let inner = self.kind_type(*kind);
                quote!(::core::option::Option<#inner>)
            }
            FieldType::Array(element) => {
                let inner = self.field_type(element)?;
                quote!(::std::vec::Vec<#inner>)
            }
            FieldType::Compact(id) => self.compact_type(*id)?,
        })
    }
}

struct RustField<'a> {
    source: &'a ResolvedField,
    ident: Ident,
    ty: TokenStream,
}

struct RustType<'a> {
    ctx: &'a RustContext<'a>,
    def: &'a ResolvedType,
    fingerprint: Fingerprint,
    name: Ident,
    fields: Vec<RustField<'a>>,
}

impl<'a> RustType<'a> {
    fn new(
        ctx: &'a RustContext<'a>,
        def: &'a ResolvedType,
        fingerprint: Fingerprint,
    ) -> EmissionResult<Self> {
        let type_name = def.qualified_name();
        let name = syn::parse_str::<Ident>(def.name.name()).map_err(|_| {
            EmissionError::render(
                &type_name,
                format!("`{}` is not a valid Rust type name", def.name.name()),
            )
        })?;

        let mut seen = HashSet::new();
        let mut fields = Vec::with_capacity(def.fields.len());
        for field in &def.fields {
            let rust_name = rust_field_name(&field.name);
            let ident = syn::parse_str::<Ident>(&rust_name).map_err(|_| {
                EmissionError::render(
                    &type_name,
                    format!("field `{}` has no valid Rust name", field.name),
                )
            })?;
            if !seen.insert(rust_name.clone()) {
                return Err(EmissionError::render(
                    &type_name,
                    format!("field `{}` maps to `{rust_name}`, which is already used", field.name),
                ));
            }
            fields.push(RustField {
                source: field,
                ident,
                ty: ctx.field_type(&field.ty)?,
            });
        }

        Ok(Self {
            ctx,
            def,
            fingerprint,
            name,
            fields,
        })
    }

    fn render(&self) -> EmissionResult<TokenStream> {
        let rt = &self.ctx.runtime;
        let name = &self.name;
        let serializer = serializer_ident(self.def);
        let doc = format!(" Compact type `{}`.", self.def.qualified_name());
        let serializer_doc = format!(" Compact serializer for [`{name}`].");
        let type_name = self.fingerprint.to_string();

        let idents: Vec<&Ident> = self.fields.iter().map(|f| &f.ident).collect();
        let types: Vec<&TokenStream> = self.fields.iter().map(|f| &f.ty).collect();
        let getters = self
            .fields
            .iter()
            .map(|f| self.getter(f))
            .collect::<EmissionResult<Vec<_>>>()?;
        let too_many = (self.fields.len() > CLIPPY_MAX_ARGUMENTS)
            .then(|| quote!(#[allow(clippy::too_many_arguments)]));

        let hash = self.render_hash();
        let display = self.render_display();
        let writes = self.fields.iter().map(|f| self.write_stmt(f)).collect::<Vec<_>>();
        let reads = self
            .fields
            .iter()
            .map(|f| self.read_expr(f))
            .collect::<EmissionResult<Vec<_>>>()?;
        let (writer, value, reader) = if self.fields.is_empty() {
            (format_ident!("_writer"), format_ident!("_value"), format_ident!("_reader"))
        } else {
            (format_ident!("writer"), format_ident!("value"), format_ident!("reader"))
        };

        Ok(quote! {
            #[doc = #doc]
            #[derive(Debug, Clone, PartialEq)]
            pub struct #name {
                #(#idents: #types,)*
            }

            impl #name {
                /// Type name written into every record of this type.
                pub const TYPE_NAME: &'static str = #type_name;

                #too_many
                pub fn new(#(#idents: #types),*) -> Self {
                    Self { #(#idents),* }
                }

                #(#getters)*
            }

            #hash

            #display

            #[doc = #serializer_doc]
            #[derive(Debug, Clone, Copy, Default)]
            pub struct #serializer;

            impl #rt::CompactSerializer for #serializer {
                type Value = #name;

                fn type_name(&self) -> &str {
                    #name::TYPE_NAME
                }

                fn write(
                    &self,
                    #writer: &mut #rt::CompactWriter<'_>,
                    #value: &#name,
                ) -> #rt::CompactResult<()> {
                    #(#writes)*
                    Ok(())
                }

                fn read(&self, #reader: &#rt::CompactReader<'_>) -> #rt::CompactResult<#name> {
                    Ok(#name {
                        #(#idents: #reads,)*
                    })
                }
            }
        })
    }

    fn getter(&self, field: &RustField<'_>) -> EmissionResult<TokenStream> {
        let ident = &field.ident;
        Ok(match &field.source.ty {
            FieldType::Primitive(PrimitiveKind::String) => quote! {
                pub fn #ident(&self) -> &str {
                    &self.#ident
                }
            },
            FieldType::NullablePrimitive(PrimitiveKind::String) => quote! {
                pub fn #ident(&self) -> ::core::option::Option<&str> {
                    self.#ident.as_deref()
                }
            },
            FieldType::Primitive(_) | FieldType::NullablePrimitive(_) => {
                let ty = &field.ty;
                quote! {
                    pub fn #ident(&self) -> #ty {
                        self.#ident
                    }
                }
            }
            FieldType::Array(element) => {
                let element = self.ctx.field_type(element)?;
                quote! {
                    pub fn #ident(&self) -> &[#element] {
                        &self.#ident
                    }
                }
            }
            FieldType::Compact(_) => {
                let ty = &field.ty;
                quote! {
                    pub fn #ident(&self) -> &#ty {
                        &self.#ident
                    }
                }
            }
        })
    }

    fn render_hash(&self) -> TokenStream {
        let name = &self.name;
        let rt = &self.ctx.runtime;
        let state = if self.fields.is_empty() {
            format_ident!("_state")
        } else {
            format_ident!("state")
        };

        let stmts = self.fields.iter().map(|field| {
            let f = &field.ident;
            let bits = |kind: PrimitiveKind| match kind {
                PrimitiveKind::Float32 => Some(quote!(#rt::hash::float32_bits)),
                PrimitiveKind::Float64 => Some(quote!(#rt::hash::float64_bits)),
                _ => None,
            };
            match &field.source.ty {
                FieldType::Primitive(kind) if bits(*kind).is_some() => {
                    let bits = bits(*kind);
                    quote!(::core::hash::Hash::hash(&#bits(self.#f), state);)
                }
                FieldType::NullablePrimitive(kind) if bits(*kind).is_some() => {
                    let bits = bits(*kind);
                    quote!(::core::hash::Hash::hash(&self.#f.map(#bits), state);)
                }
                FieldType::Array(element) => match element.as_ref() {
                    FieldType::Primitive(kind) if bits(*kind).is_some() => {
                        let bits = bits(*kind);
                        quote! {
                            ::core::hash::Hash::hash(&self.#f.len(), state);
                            for item in &self.#f {
                                ::core::hash::Hash::hash(&#bits(*item), state);
                            }
                        }
                    }
                    FieldType::NullablePrimitive(kind) if bits(*kind).is_some() => {
                        let bits = bits(*kind);
                        quote! {
                            ::core::hash::Hash::hash(&self.#f.len(), state);
                            for item in &self.#f {
                                ::core::hash::Hash::hash(&item.map(#bits), state);
                            }
                        }
                    }
                    _ => quote!(::core::hash::Hash::hash(&self.#f, state);),
                },
                _ => quote!(::core::hash::Hash::hash(&self.#f, state);),
            }
        });

        quote! {
            impl ::core::hash::Hash for #name {
                fn hash<H: ::core::hash::Hasher>(&self, #state: &mut H) {
                    #(#stmts)*
                }
            }
        }
    }

    fn render_display(&self) -> TokenStream {
        let name = &self.name;
        let rt = &self.ctx.runtime;

        let mut format = format!("<{}> {{{{", self.def.name.name());
        let mut args = Vec::with_capacity(self.fields.len());
        for (index, field) in self.fields.iter().enumerate() {
            if index > 0 {
                format.push_str(", ");
            }
            format.push_str(&field.source.name);
            format.push_str("={}");

            let f = &field.ident;
            args.push(match &field.source.ty {
                FieldType::NullablePrimitive(_) => quote!(#rt::fmt::Nullable(&self.#f)),
                FieldType::Array(element) => match element.as_ref() {
                    FieldType::NullablePrimitive(_) => {
                        quote!(#rt::fmt::ArrayOfNullable(&self.#f))
                    }
                    _ => quote!(#rt::fmt::Array(&self.#f)),
                },
                _ => quote!(self.#f),
            });
        }
        format.push_str("}}");

        quote! {
            impl ::core::fmt::Display for #name {
                fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                    ::core::write!(f, #format #(, #args)*)
                }
            }
        }
    }

    fn write_stmt(&self, field: &RustField<'_>) -> TokenStream {
        let f = &field.ident;
        let name = &field.source.name;
        match &field.source.ty {
            FieldType::Primitive(kind) => {
                let method = format_ident!("write_{}", method_kind(*kind));
                if *kind == PrimitiveKind::String {
                    quote!(writer.#method(#name, &value.#f);)
                } else {
                    quote!(writer.#method(#name, value.#f);)
                }
            }
            FieldType::NullablePrimitive(kind) => {
                let method = format_ident!("write_nullable_{}", method_kind(*kind));
                if *kind == PrimitiveKind::String {
                    quote!(writer.#method(#name, value.#f.as_deref());)
                } else {
                    quote!(writer.#method(#name, value.#f);)
                }
            }
            FieldType::Array(element) => match element.as_ref() {
                FieldType::Primitive(kind) => {
                    let method = format_ident!("write_array_of_{}", method_kind(*kind));
                    quote!(writer.#method(#name, &value.#f);)
                }
                FieldType::NullablePrimitive(kind) => {
                    let method = format_ident!("write_array_of_nullable_{}", method_kind(*kind));
                    quote!(writer.#method(#name, &value.#f);)
                }
                _ => quote!(writer.write_array_of_compact(#name, &value.#f)?;),
            },
            FieldType::Compact(_) => quote!(writer.write_compact(#name, &value.#f)?;),
        }
    }

    fn read_expr(&self, field: &RustField<'_>) -> EmissionResult<TokenStream> {
        let name = &field.source.name;
        let default = field.source.default.map(rust_literal);
        Ok(match &field.source.ty {
            FieldType::Primitive(kind) => match default {
                Some(default) => {
                    let method = format_ident!("read_{}_or", method_kind(*kind));
                    quote!(reader.#method(#name, #default)?)
                }
                None => {
                    let method = format_ident!("read_{}", method_kind(*kind));
                    quote!(reader.#method(#name)?)
                }
            },
            FieldType::NullablePrimitive(kind) => match default {
                Some(default) => {
                    let method = format_ident!("read_nullable_{}_or", method_kind(*kind));
                    quote!(reader.#method(#name, #default)?)
                }
                None => {
                    let method = format_ident!("read_nullable_{}", method_kind(*kind));
                    quote!(reader.#method(#name)?)
                }
            },
            FieldType::Array(element) => match element.as_ref() {
                FieldType::Primitive(kind) => {
                    let method = format_ident!("read_array_of_{}", method_kind(*kind));
                    quote!(reader.#method(#name)?)
                }
                FieldType::NullablePrimitive(kind) => {
                    let method = format_ident!("read_array_of_nullable_{}", method_kind(*kind));
                    quote!(reader.#method(#name)?)
                }
                FieldType::Compact(id) => {
                    let ty = self.ctx.compact_type(*id)?;
                    quote!(reader.read_array_of_compact::<#ty>(#name)?)
                }
                FieldType::Array(_) => {
                    return Err(EmissionError::render(
                        self.def.qualified_name(),
                        format!("field `{name}` is a nested array"),
                    ));
                }
            },
            FieldType::Compact(id) => {
                let ty = self.ctx.compact_type(*id)?;
                quote!(reader.read_compact::<#ty>(#name)?)
            }
        })
    }
}

/// Configured Rust path for an external type, or `crate::<namespace>::<Name>`.
pub(crate) fn external_path(config: &RustConfig, qualified: &str) -> String {
    config
        .externals
        .get(qualified)
        .cloned()
        .unwrap_or_else(|| format!("crate::{}", qualified.replace('.', "::")))
}

/// Kind segment of runtime method names, e.g. `timestamp_with_timezone`.
fn method_kind(kind: PrimitiveKind) -> String {
    to_snake_case(kind.keyword())
}

/// Unsuffixed literal for a default, with negation as a separate token.
fn rust_literal(default: DefaultValue) -> TokenStream {
    let (negative, literal) = match default {
        DefaultValue::Boolean(value) => return quote!(#value),
        DefaultValue::Int8(v) => (v < 0, Literal::u8_unsuffixed(v.unsigned_abs())),
        DefaultValue::Int16(v) => (v < 0, Literal::u16_unsuffixed(v.unsigned_abs())),
        DefaultValue::Int32(v) => (v < 0, Literal::u32_unsuffixed(v.unsigned_abs())),
        DefaultValue::Int64(v) => (v < 0, Literal::u64_unsuffixed(v.unsigned_abs())),
        DefaultValue::Float32(v) => (v.is_sign_negative(), Literal::f32_unsuffixed(v.abs())),
        DefaultValue::Float64(v) => (v.is_sign_negative(), Literal::f64_unsuffixed(v.abs())),
    };
    if negative {
        quote!(-#literal)
    } else {
        quote!(#literal)
    }
}
