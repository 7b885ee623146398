use proc_macro::TokenStream;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Expr, Fields, parse_macro_input, spanned::Spanned};

/// Variant attribute: #[weight(<expr>)], a `u32` weight
#[proc_macro_derive(WeightedEnum, attributes(weight))]
pub fn derive_weighted_enum(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let enum_ident = &input.ident;

    let Data::Enum(data_enum) = &input.data else {
        return syn::Error::new(
            input.ident.span(),
            "WeightedEnum can only be derived for enums",
        )
        .to_compile_error()
        .into();
    };

    // Collect (variant_ident, weight_expr)
    let mut entries = Vec::new();

    for variant in &data_enum.variants {
        // Only fieldless enums are supported (weighted pools are usually C-like)
        match &variant.fields {
            Fields::Unit => {}
            _ => {
                return syn::Error::new(
                    variant.span(),
                    "WeightedEnum only supports fieldless variants",
                )
                .to_compile_error()
                .into();
            }
        }

        // Find #[weight(...)]
        let mut weight_expr: Option<Expr> = None;
        for Attribute { meta, .. } in &variant.attrs {
            if meta.path().is_ident("weight") {
                match meta {
                    syn::Meta::List(list) => {
                        // Parse inside as an expression (e.g., 10 or 2 * 30)
                        let expr = syn::parse2::<Expr>(list.tokens.clone()).map_err(|e| {
                            syn::Error::new(list.span(), format!("invalid weight expr: {e}"))
                        });
                        match expr {
                            Ok(e) => weight_expr = Some(e),
                            Err(err) => return err.to_compile_error().into(),
                        }
                    }
                    _ => {
                        return syn::Error::new(meta.span(), "use #[weight(<expr>)]")
                            .to_compile_error()
                            .into();
                    }
                }
            }
        }
        let Some(expr) = weight_expr else {
            return syn::Error::new(variant.span(), "missing #[weight(...)] on variant")
                .to_compile_error()
                .into();
        };

        let ident = &variant.ident;
        entries.push(quote! { (Self::#ident, (#expr)) });
    }

    // Generate const ENTRIES and a seeded weight_set() inherent as sugar.
    let expanded = quote! {
        impl weightset::WeightedEnum for #enum_ident {
            const ENTRIES: &'static [(Self, u32)] = &[
                #(#entries),*
            ];
        }

        impl #enum_ident {
            /// Build a seeded `WeightSet<#enum_ident>` from the annotated weights.
            pub fn weight_set(
                seed: u64,
            ) -> ::core::result::Result<weightset::WeightSet<Self>, weightset::WeightError>
            where
                Self: ::core::marker::Copy + ::core::cmp::Ord,
            {
                <Self as weightset::WeightedEnum>::weight_set(seed)
            }
        }
    };

    expanded.into()
}
