//! Code generation for `FilterParams`
//!
//! Emits the static descriptor table, the value accessor and the param
//! codec for a filter struct. Generated code only names `filter_object::`
//! paths.

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{Generics, Ident};

use crate::parsing::FilterField;

fn kind_tokens(field: &FilterField) -> TokenStream {
    match field.kind {
        Some(kind) => {
            let variant = Ident::new(kind.variant_name(), Span::call_site());
            quote! { ::core::option::Option::Some(filter_object::FieldKind::#variant) }
        }
        None => quote! { ::core::option::Option::None },
    }
}

fn descriptor_tokens(field: &FilterField) -> TokenStream {
    let name = field.ident.to_string();
    let param = &field.param;
    let column = &field.column;
    let json_key = match &field.json_key {
        Some(key) => quote! { ::core::option::Option::Some(#key) },
        None => quote! { ::core::option::Option::None },
    };
    let kind = kind_tokens(field);

    quote! {
        filter_object::FieldDescriptor {
            field: #name,
            param: #param,
            column: #column,
            json_key: #json_key,
            kind: #kind,
        }
    }
}

fn value_tokens(field: &FilterField) -> TokenStream {
    let ident = &field.ident;
    match field.kind {
        Some(_) => quote! { filter_object::ToFieldValue::to_field_value(&self.#ident) },
        None => quote! { filter_object::FieldValue::Unsupported },
    }
}

pub fn generate_filter_params_impl(
    name: &Ident,
    generics: &Generics,
    fields: &[FilterField],
    sortable: &[String],
) -> TokenStream {
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let descriptors: Vec<TokenStream> = fields.iter().map(descriptor_tokens).collect();
    let values: Vec<TokenStream> = fields.iter().map(value_tokens).collect();

    // Only fields with a param and a known type take part in the codec
    let codec_fields: Vec<&FilterField> = fields
        .iter()
        .filter(|f| f.has_param() && f.kind.is_some())
        .collect();

    let decoders = codec_fields.iter().map(|field| {
        let ident = &field.ident;
        let ty = &field.ty;
        let param = &field.param;
        quote! {
            if let ::core::option::Option::Some(values) = params.get(#param) {
                if let ::core::option::Option::Some(value) =
                    <#ty as filter_object::ParamValue>::decode_param(#param, values)?
                {
                    filter.#ident = value;
                }
            }
        }
    });

    let encoders = codec_fields.iter().map(|field| {
        let ident = &field.ident;
        let param = &field.param;
        quote! {
            filter_object::insert_param(
                &mut params,
                #param,
                filter_object::ParamValue::encode_param(&self.#ident),
            );
        }
    });

    quote! {
        impl #impl_generics filter_object::FilterParams for #name #ty_generics #where_clause {
            fn descriptors() -> &'static [filter_object::FieldDescriptor] {
                const DESCRIPTORS: &[filter_object::FieldDescriptor] = &[#(#descriptors),*];
                DESCRIPTORS
            }

            fn field_values(&self) -> ::std::vec::Vec<filter_object::FieldValue> {
                ::std::vec![#(#values),*]
            }

            fn sortable_columns() -> &'static [&'static str] {
                &[#(#sortable),*]
            }

            #[allow(unused_mut)]
            fn from_params(
                params: &filter_object::ParamMap,
            ) -> ::core::result::Result<Self, filter_object::ParamError> {
                let mut filter = <Self as ::core::default::Default>::default();
                #(#decoders)*
                ::core::result::Result::Ok(filter)
            }

            #[allow(unused_mut)]
            fn to_params(&self) -> filter_object::ParamMap {
                let mut params = filter_object::ParamMap::new();
                #(#encoders)*
                params
            }
        }
    }
}
