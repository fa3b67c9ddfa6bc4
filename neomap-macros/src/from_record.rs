use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Expr, ExprLit, Fields, Lit};

struct FieldInfo {
    ident: syn::Ident,
    ty: syn::Type,
    key: String,
    flatten: bool,
}

fn str_value(meta: &syn::meta::ParseNestedMeta<'_>) -> syn::Result<String> {
    let expr: Expr = meta.value()?.parse()?;
    match expr {
        Expr::Lit(ExprLit { lit: Lit::Str(s), .. }) => Ok(s.value()),
        other => Err(syn::Error::new_spanned(other, "expected a string literal")),
    }
}

fn type_name(ast: &DeriveInput) -> syn::Result<String> {
    let mut name = None;
    for attr in &ast.attrs {
        if attr.path().is_ident("neomap") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    name = Some(str_value(&meta)?);
                    Ok(())
                } else {
                    Err(meta.error("unsupported neomap attribute; expected `name`"))
                }
            })?;
        }
    }
    Ok(name.unwrap_or_else(|| ast.ident.to_string()))
}

fn parse_field(f: &syn::Field) -> syn::Result<FieldInfo> {
    let ident = f
        .ident
        .clone()
        .ok_or_else(|| syn::Error::new_spanned(f, "FromRecord fields must be named"))?;
    let mut key = ident.to_string();
    let mut flatten = false;

    for attr in &f.attrs {
        if attr.path().is_ident("neomap") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("flatten") {
                    flatten = true;
                    Ok(())
                } else if meta.path.is_ident("prop") {
                    key = str_value(&meta)?;
                    Ok(())
                } else {
                    Err(meta.error("unsupported neomap attribute; expected `prop` or `flatten`"))
                }
            })?;
        }
    }

    Ok(FieldInfo { ident, ty: f.ty.clone(), key, flatten })
}

pub fn expand(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);
    match expand_derive(&ast) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn expand_derive(ast: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &ast.ident;
    let hint_name = type_name(ast)?;
    // Every type parameter ends up in a field conversion.
    let mut generics = ast.generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(syn::parse_quote!(neomap_core::traits::FromValue));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let data = match &ast.data {
        Data::Struct(s) => s,
        _ => return Err(syn::Error::new_spanned(ast, "FromRecord only supports structs")),
    };

    let construct = match &data.fields {
        // The empty product never inspects the record.
        Fields::Unit => quote! { Ok(Self) },
        Fields::Named(named) => {
            let fields = named.named.iter().map(parse_field).collect::<syn::Result<Vec<_>>>()?;
            let keys: Vec<&str> = fields.iter().filter(|f| !f.flatten).map(|f| f.key.as_str()).collect();

            // Struct literal fields are evaluated in declaration order, so the
            // first `?` to fire names the first failing declared field.
            let inits = fields.iter().map(|f| {
                let ident = &f.ident;
                let ty = &f.ty;
                let key = &f.key;
                if f.flatten {
                    quote! {
                        #ident: <#ty as neomap_core::traits::FromRecord>::from_record(record, None)
                            .map_err(|e| e.with_hint(hint))?
                    }
                } else {
                    quote! {
                        #ident: <#ty as neomap_core::traits::FromValue>::from_value(#key, record.value(#key))
                            .map_err(|e| e.with_hint(hint))?
                    }
                }
            });

            quote! {
                const FIELDS: &[&str] = &[#(#keys),*];
                let record = record.for_product(FIELDS);
                let record: &neomap_core::record::Record = &record;
                Ok(Self {
                    #(#inits,)*
                })
            }
        }
        Fields::Unnamed(_) => {
            return Err(syn::Error::new_spanned(ast, "FromRecord only supports structs with named fields"));
        }
    };

    Ok(quote! {
        impl #impl_generics neomap_core::traits::FromRecord for #name #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn from_record(
                record: &neomap_core::record::Record,
                hint: Option<&neomap_core::hint::TypeHint>,
            ) -> Result<Self, neomap_core::error::NeomapError> {
                let own_hint = neomap_core::hint::TypeHint::new(#hint_name);
                let hint = hint.unwrap_or(&own_hint);
                #construct
            }
        }

        impl #impl_generics neomap_core::traits::FromValue for #name #ty_generics #where_clause {
            fn from_value(
                field: &str,
                value: Option<neomap_core::value::Value>,
            ) -> Result<Self, neomap_core::error::NeomapError> {
                neomap_core::record::product_from_value(field, value)
            }
        }
    })
}
