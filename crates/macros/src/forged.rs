//! `Forged` derive macro.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr, parse_macro_input};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Style {
	Unspecified,
	Named,
	Positional,
	Keywords,
}

struct Container {
	style: Style,
	lax: bool,
}

pub fn derive_forged(input: TokenStream) -> TokenStream {
	let input = parse_macro_input!(input as DeriveInput);
	expand(&input)
		.unwrap_or_else(syn::Error::into_compile_error)
		.into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
	let Data::Struct(data) = &input.data else {
		return Err(syn::Error::new_spanned(
			input,
			"Forged can only be derived for structs",
		));
	};
	let Fields::Named(fields) = &data.fields else {
		return Err(syn::Error::new_spanned(
			input,
			"Forged can only be derived for structs with named fields",
		));
	};

	let container = parse_container(input)?;

	let mut idents = Vec::new();
	let mut keys = Vec::new();
	for field in &fields.named {
		let Some(ident) = &field.ident else {
			continue;
		};
		keys.push(parse_field_key(field)?.unwrap_or_else(|| ident.to_string()));
		idents.push(ident);
	}

	let name = &input.ident;
	let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
	let count = idents.len();

	let take_named = quote! {
		let value = Self {
			#(#idents: ::object_forge::molds::record::take_field(&mut fields, #keys)?,)*
		};
		::object_forge::molds::record::reject_extra(&fields)?;
		::core::result::Result::Ok(value)
	};

	if container.style == Style::Keywords {
		return Ok(quote! {
			impl #impl_generics ::object_forge::molds::FromKeywords for #name #ty_generics #where_clause {
				fn from_keywords(
					mut fields: ::object_forge::Attributes,
				) -> ::core::result::Result<Self, ::object_forge::ConstructError> {
					#take_named
				}
			}

			impl #impl_generics ::object_forge::Forged for #name #ty_generics #where_clause {
				fn shape() -> ::object_forge::Shape<Self> {
					::object_forge::Shape::keywords()
				}
			}
		});
	}

	let style = match container.style {
		Style::Named => quote!(Named),
		Style::Positional => quote!(Positional),
		Style::Unspecified | Style::Keywords => quote!(Unspecified),
	};
	let shape = if container.lax {
		quote!(record_lax)
	} else {
		quote!(record)
	};

	Ok(quote! {
		impl #impl_generics ::object_forge::molds::Record for #name #ty_generics #where_clause {
			const FIELDS: &'static [&'static str] = &[#(#keys),*];
			const STYLE: ::object_forge::molds::ArgStyle = ::object_forge::molds::ArgStyle::#style;

			fn from_named(
				mut fields: ::object_forge::Attributes,
			) -> ::core::result::Result<Self, ::object_forge::ConstructError> {
				#take_named
			}

			fn from_positional(
				values: ::std::vec::Vec<::object_forge::Value>,
			) -> ::core::result::Result<Self, ::object_forge::ConstructError> {
				let mut values = ::object_forge::molds::record::Positional::new(values, #count)?;
				::core::result::Result::Ok(Self {
					#(#idents: values.next_field(#keys)?,)*
				})
			}
		}

		impl #impl_generics ::object_forge::Forged for #name #ty_generics #where_clause {
			fn shape() -> ::object_forge::Shape<Self> {
				::object_forge::Shape::#shape()
			}
		}
	})
}

fn parse_container(input: &DeriveInput) -> syn::Result<Container> {
	let mut container = Container {
		style: Style::Unspecified,
		lax: false,
	};
	for attr in input.attrs.iter().filter(|a| a.path().is_ident("forged")) {
		attr.parse_nested_meta(|meta| {
			let style = if meta.path.is_ident("named") {
				Style::Named
			} else if meta.path.is_ident("positional") {
				Style::Positional
			} else if meta.path.is_ident("keywords") {
				Style::Keywords
			} else if meta.path.is_ident("lax") {
				container.lax = true;
				return Ok(());
			} else {
				return Err(meta.error("expected `named`, `positional`, `keywords` or `lax`"));
			};
			if container.style != Style::Unspecified && container.style != style {
				return Err(meta.error("conflicting argument styles"));
			}
			container.style = style;
			Ok(())
		})?;
	}
	if container.lax && container.style == Style::Keywords {
		return Err(syn::Error::new_spanned(
			&input.ident,
			"`lax` applies to records, not to `keywords`",
		));
	}
	Ok(container)
}

fn parse_field_key(field: &syn::Field) -> syn::Result<Option<String>> {
	let mut key = None;
	for attr in field.attrs.iter().filter(|a| a.path().is_ident("forged")) {
		attr.parse_nested_meta(|meta| {
			if meta.path.is_ident("rename") {
				key = Some(meta.value()?.parse::<LitStr>()?.value());
				Ok(())
			} else {
				Err(meta.error("expected `rename = \"...\"`"))
			}
		})?;
	}
	Ok(key)
}
