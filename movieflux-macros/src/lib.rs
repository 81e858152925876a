//! Procedural macros for movieflux

use darling::{FromDeriveInput, FromVariant};
use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

/// Container-level attributes for #[derive(Action)]
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(action), supports(enum_any))]
struct ActionOpts {
    ident: syn::Ident,
    generics: syn::Generics,
    data: darling::ast::Data<ActionVariant, ()>,

    /// Category shared by every variant that does not override it
    #[darling(default)]
    category: Option<String>,
}

/// Variant-level attributes
#[derive(Debug, FromVariant)]
#[darling(attributes(action))]
struct ActionVariant {
    ident: syn::Ident,
    fields: darling::ast::Fields<syn::Type>,

    /// Explicit category override
    #[darling(default)]
    category: Option<String>,

    /// Forward name and category to the single wrapped action
    #[darling(default)]
    delegate: bool,

    /// No category for this variant
    #[darling(default)]
    skip_category: bool,
}

/// Derive macro for the Action trait
///
/// Generates a `name()` method that returns the variant name as a static string.
///
/// Attributes:
/// - `#[action(category = "movies")]` on the enum sets the category of every variant
/// - `#[action(category = "...")]` on a variant overrides it
/// - `#[action(skip_category)]` on a variant leaves it uncategorized
/// - `#[action(delegate)]` on a single-field tuple variant forwards both
///   `name()` and `category()` to the wrapped action
///
/// # Example
/// ```ignore
/// #[derive(Action, Clone, Debug)]
/// #[action(category = "movies")]
/// enum MoviesAction {
///     SetGenres { genres: Vec<Genre> },
///     AddToWishlist { movie: MovieId, at: DateTime<Utc> },
/// }
///
/// #[derive(Action, Clone, Debug)]
/// enum AppAction {
///     #[action(delegate)]
///     Movies(MoviesAction),
/// }
///
/// let action = AppAction::Movies(MoviesAction::SetGenres { genres: vec![] });
/// assert_eq!(action.name(), "SetGenres");
/// assert_eq!(action.category(), Some("movies"));
/// ```
#[proc_macro_derive(Action, attributes(action))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let opts = match ActionOpts::from_derive_input(&input) {
        Ok(opts) => opts,
        Err(e) => return e.write_errors().into(),
    };

    let name = &opts.ident;
    let (impl_generics, ty_generics, where_clause) = opts.generics.split_for_impl();

    let variants = match &opts.data {
        darling::ast::Data::Enum(variants) => variants,
        _ => {
            return syn::Error::new_spanned(&input, "Action can only be derived for enums")
                .to_compile_error()
                .into();
        }
    };

    for v in variants.iter() {
        let single_tuple =
            matches!(v.fields.style, darling::ast::Style::Tuple) && v.fields.len() == 1;
        if v.delegate && !single_tuple {
            return syn::Error::new_spanned(
                &v.ident,
                "#[action(delegate)] requires a tuple variant with exactly one field",
            )
            .to_compile_error()
            .into();
        }
    }

    let name_arms = variants.iter().map(|v| {
        let variant_name = &v.ident;
        let variant_str = variant_name.to_string();

        if v.delegate {
            return quote! {
                #name::#variant_name(inner) => ::movieflux_core::Action::name(inner)
            };
        }
        match &v.fields.style {
            darling::ast::Style::Unit => quote! {
                #name::#variant_name => #variant_str
            },
            darling::ast::Style::Tuple => quote! {
                #name::#variant_name(..) => #variant_str
            },
            darling::ast::Style::Struct => quote! {
                #name::#variant_name { .. } => #variant_str
            },
        }
    });

    let category_arms = variants.iter().map(|v| {
        let variant_name = &v.ident;

        if v.delegate {
            return quote! {
                #name::#variant_name(inner) => ::movieflux_core::Action::category(inner)
            };
        }

        let category = if v.skip_category {
            None
        } else {
            v.category.as_ref().or(opts.category.as_ref())
        };
        let value = match category {
            Some(cat) => quote! { ::core::option::Option::Some(#cat) },
            None => quote! { ::core::option::Option::None },
        };
        match &v.fields.style {
            darling::ast::Style::Unit => quote! {
                #name::#variant_name => #value
            },
            darling::ast::Style::Tuple => quote! {
                #name::#variant_name(..) => #value
            },
            darling::ast::Style::Struct => quote! {
                #name::#variant_name { .. } => #value
            },
        }
    });

    let expanded = quote! {
        impl #impl_generics ::movieflux_core::Action for #name #ty_generics #where_clause {
            fn name(&self) -> &'static str {
                match self {
                    #(#name_arms),*
                }
            }

            fn category(&self) -> ::core::option::Option<&'static str> {
                match self {
                    #(#category_arms),*
                }
            }
        }
    };

    TokenStream::from(expanded)
}
