use proc_macro::TokenStream;
use syn::{DeriveInput, Fields, Ident, Type};

fn impl_from_trait(ast: DeriveInput) -> TokenStream {
    let ident = ast.ident;

    let wrapped: Vec<(Ident, Type)> = match ast.data {
        syn::Data::Struct(_) => panic!("Structs are not supported by From"),
        syn::Data::Enum(ref data) => data
            .variants
            .iter()
            .map(|v| match v.fields {
                // only single-field tuple variants can be built from their payload
                Fields::Unnamed(ref f) if f.unnamed.len() == 1 => {
                    (v.ident.clone(), f.unnamed[0].ty.clone())
                }
                _ => panic!(
                    "From needs every variant of {} to wrap exactly one unnamed field",
                    ident
                ),
            })
            .collect(),
        syn::Data::Union(_) => panic!("Unions are not supported by From"),
    };

    let mut tokens = quote::quote!();
    for (variant, ty) in wrapped {
        tokens.extend(quote::quote! {
            impl From<#ty> for #ident {
                fn from (e: #ty) -> Self {
                    #ident::#variant(e)
                }
            }
        });
    }
    tokens.into()
}

#[proc_macro_derive(From)]
pub fn from_derive_macro(item: TokenStream) -> TokenStream {
    let ast: DeriveInput = syn::parse(item).unwrap();
    impl_from_trait(ast)
}
