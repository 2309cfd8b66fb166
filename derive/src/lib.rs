//! `#[derive(Bindable)]` for flagbind-core.
//!
//! The derive implements `Bindable` and `BindField` for a struct with named
//! fields. Each field may carry one `#[flag(...)]` attribute:
//!
//! - `long = "name"` sets the long flag name (defaults to the field name);
//! - `short = "n"` sets the short flag name;
//! - `skip` hides the field from binding entirely.
//!
//! Short names are checked when binding starts rather than at compile time,
//! so a malformed one surfaces as a `ShortFlagDeclaration` error.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    Data, DeriveInput, Field, Fields, Ident, LitStr, Result, Type, ext::IdentExt,
    parse_macro_input,
};

#[proc_macro_derive(Bindable, attributes(flag))]
pub fn derive_bindable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

struct BoundField {
    ident: Ident,
    ty: Type,
    long: Option<String>,
    short: Option<String>,
}

impl BoundField {
    fn tag(&self) -> TokenStream2 {
        let name = self.ident.unraw().to_string();
        let long = option_str(self.long.as_deref());
        let short = option_str(self.short.as_deref());
        quote! {
            ::flagbind_core::FieldTag {
                name: #name,
                long: #long,
                short: #short,
            }
        }
    }
}

fn option_str(value: Option<&str>) -> TokenStream2 {
    match value {
        Some(value) => quote!(::core::option::Option::Some(#value)),
        None => quote!(::core::option::Option::None),
    }
}

fn expand(input: DeriveInput) -> Result<TokenStream2> {
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "Bindable can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Bindable can only be derived for structs",
            ));
        }
    };

    let mut fields = Vec::new();
    for field in named {
        if let Some(bound) = parse_field(field)? {
            fields.push(bound);
        }
    }

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let tags: Vec<TokenStream2> = fields.iter().map(BoundField::tag).collect();
    let types = fields.iter().map(|f| &f.ty);
    let idents = fields.iter().map(|f| &f.ident);

    Ok(quote! {
        impl #impl_generics ::flagbind_core::Bindable for #name #ty_generics #where_clause {
            fn schema() -> ::std::vec::Vec<::flagbind_core::FieldDescriptor> {
                ::std::vec![
                    #(
                        ::flagbind_core::FieldDescriptor {
                            tag: #tags,
                            nested: <#types as ::flagbind_core::BindField>::nested_schema(),
                        }
                    ),*
                ]
            }

            fn descriptors(&self) -> ::std::vec::Vec<::flagbind_core::FieldDescriptor> {
                <Self as ::flagbind_core::Bindable>::schema()
            }

            fn visit_fields(
                &mut self,
                visitor: &mut dyn ::flagbind_core::FieldVisitor,
            ) -> ::core::result::Result<(), ::flagbind_core::BindError> {
                #(
                    visitor.visit(&#tags, &mut self.#idents)?;
                )*
                ::core::result::Result::Ok(())
            }
        }

        impl #impl_generics ::flagbind_core::BindField for #name #ty_generics #where_clause {
            fn field_kind(&mut self) -> ::flagbind_core::FieldKind<'_> {
                ::flagbind_core::FieldKind::Record(self)
            }

            fn nested_schema() -> ::core::option::Option<
                fn() -> ::std::vec::Vec<::flagbind_core::FieldDescriptor>,
            > {
                ::core::option::Option::Some(<Self as ::flagbind_core::Bindable>::schema)
            }
        }
    })
}

/// Reads the `#[flag(...)]` attributes of one field. `None` means skipped.
fn parse_field(field: &Field) -> Result<Option<BoundField>> {
    let Some(ident) = field.ident.clone() else {
        return Err(syn::Error::new_spanned(field, "expected a named field"));
    };

    let mut bound = BoundField {
        ident,
        ty: field.ty.clone(),
        long: None,
        short: None,
    };
    let mut skip = false;

    for attr in field.attrs.iter().filter(|a| a.path().is_ident("flag")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                skip = true;
                return Ok(());
            }
            if meta.path.is_ident("long") {
                let lit: LitStr = meta.value()?.parse()?;
                if lit.value().is_empty() {
                    return Err(syn::Error::new_spanned(lit, "long flag name is empty"));
                }
                bound.long = Some(lit.value());
                return Ok(());
            }
            if meta.path.is_ident("short") {
                let lit: LitStr = meta.value()?.parse()?;
                bound.short = Some(lit.value());
                return Ok(());
            }
            Err(meta.error("unknown flag attribute, expected `long`, `short` or `skip`"))
        })?;
    }

    Ok((!skip).then_some(bound))
}
