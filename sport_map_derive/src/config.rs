use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote, quote_spanned, ToTokens};
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Field, Fields, LitStr, Type};

/// Options parsed from `#[service_config(..)]` on a single field
#[derive(Default)]
struct FieldOptions {
    skip: bool,
    rename: Option<String>,
}

pub fn expand_derive_from_service_config(
    input: &DeriveInput,
) -> Result<TokenStream, Vec<syn::Error>> {
    let name = &input.ident;
    let setters = config_setters(input)?;
    let expanded = quote! {
        impl crate::config::FromServiceConfig for #name {
            fn from_config(
                config: &crate::config::ServiceConfig,
            ) -> ::std::result::Result<Self, crate::Error> {
                let mut base = Self::default();
                for key in config.parameters() {
                    match key.as_str() {
                        #setters
                        _ => log::warn!(
                            "unknown configuration parameter for {}: {}={:?}",
                            stringify!(#name),
                            key,
                            config.get_parameter(key)
                        ),
                    }
                }
                Ok(base)
            }
        }
    };

    Ok(expanded)
}

/// Generate a match arm for each field that isn't annotated with #[service_config(skip)]
fn config_setters(input: &DeriveInput) -> Result<TokenStream, Vec<syn::Error>> {
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(vec![syn::Error::new(
                    input.span(),
                    "FromServiceConfig requires a struct with named fields",
                )])
            }
        },
        _ => {
            return Err(vec![syn::Error::new(
                input.span(),
                "FromServiceConfig can only be derived for structs",
            )])
        }
    };

    let mut errors = Vec::new();
    let mut arms = Vec::new();
    for field in fields {
        match field_options(field) {
            Ok(opts) if opts.skip => {}
            Ok(opts) => match generate_setter(field, opts.rename) {
                Ok(arm) => arms.push(arm),
                Err(e) => errors.push(e),
            },
            Err(e) => errors.push(e),
        }
    }
    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(quote! { #(#arms)* })
}

fn field_options(field: &Field) -> Result<FieldOptions, syn::Error> {
    let mut opts = FieldOptions::default();
    for attr in field
        .attrs
        .iter()
        .filter(|a| a.path().is_ident("service_config"))
    {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                opts.skip = true;
                Ok(())
            } else if meta.path.is_ident("rename") {
                let value: LitStr = meta.value()?.parse()?;
                opts.rename = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("expected `skip` or `rename = \"...\"`"))
            }
        })?;
    }
    Ok(opts)
}

fn generate_setter(field: &Field, rename: Option<String>) -> Result<TokenStream, syn::Error> {
    let name = field
        .ident
        .as_ref()
        .ok_or_else(|| syn::Error::new(field.span(), "field must be named"))?;
    let key = rename.unwrap_or_else(|| name.to_string());
    let (get_fn, kind) = get_param_fn_ident(&field.ty)?;

    let ty = &field.ty;
    let assignment = match kind {
        Assign::Direct => quote_spanned! { field.span() => base.#name = val? },
        Assign::Cast => quote_spanned! { field.span() => base.#name = val? as #ty },
        Assign::Convert => quote_spanned! { field.span() =>
            let val = val?;
            base.#name = <#ty as ::std::convert::TryFrom<i64>>::try_from(val).map_err(|_| {
                crate::Error::InvalidConfigurationValue(format!(
                    "invalid value for {}.{}, {} is out of range for {}",
                    config.handler(),
                    #key,
                    val,
                    stringify!(#ty)
                ))
            })?
        },
        Assign::Some => quote_spanned! { field.span() => base.#name = Some(val?) },
    };

    Ok(quote_spanned! {
        field.span() => #key => {
            if let Some(val) = config.#get_fn(#key) {
                #assignment
            }
        }
    })
}

/// How the fetched parameter is stored into the field
enum Assign {
    Direct,
    /// lossy `as` conversion, only used between float types
    Cast,
    /// checked integer conversion that rejects out of range values
    Convert,
    Some,
}

fn get_param_fn_ident(ty: &Type) -> Result<(Ident, Assign), syn::Error> {
    let type_str = ty.to_token_stream().to_string().replace(' ', "");
    let found = match type_str.as_str() {
        "String" => ("get_parameter_as_string", Assign::Direct),
        "Option<String>" => ("get_parameter_as_string", Assign::Some),
        "bool" => ("get_parameter_as_bool", Assign::Direct),
        "f32" | "f64" => ("get_parameter_as_f64", Assign::Cast),
        "u8" | "u16" | "u32" | "u64" | "usize" | "i8" | "i16" | "i32" | "i64" | "isize" => {
            ("get_parameter_as_i64", Assign::Convert)
        }
        _ => {
            return Err(syn::Error::new(
                ty.span(),
                format!("FromServiceConfig doesn't support type {}", type_str),
            ))
        }
    };
    Ok((format_ident!("{}", found.0), found.1))
}
