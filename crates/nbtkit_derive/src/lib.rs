//! `#[derive(NbtBind)]`: generated `FromTag`/`ToTag` impls for record structs.

extern crate proc_macro;

use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};
use syn::ext::IdentExt;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Field, Fields, GenericParam, Generics, LitStr, Meta, WhereClause, parse_macro_input, parse_quote};

/// Derive `nbtkit::nbt::FromTag` and `nbtkit::nbt::ToTag` for a struct with named fields.
///
/// Fields opt in with `#[nbt(name = "tagName")]`, or `#[nbt]` to bind under the
/// field identifier; all other fields are left alone in both directions. The
/// unmarshal side starts from `Default::default()`.
#[proc_macro_derive(NbtBind, attributes(nbt))]
pub fn derive_nbt_bind(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
	let input = parse_macro_input!(input as DeriveInput);
	expand(input).unwrap_or_else(syn::Error::into_compile_error).into()
}

struct Binding<'a> {
	field: &'a Field,
	name: String,
}

fn expand(input: DeriveInput) -> syn::Result<TokenStream> {
	let bindings = collect_bindings(&input)?;
	let name = &input.ident;

	let from_generics = add_trait_bounds(input.generics.clone(), quote!(::nbtkit::nbt::FromTag));
	let (from_impl, from_ty, from_where) = from_generics.split_for_impl();
	let mut from_where = from_where.cloned().unwrap_or_else(|| WhereClause {
		where_token: Default::default(),
		predicates: Punctuated::new(),
	});
	from_where.predicates.push(parse_quote!(Self: ::core::default::Default));

	let to_generics = add_trait_bounds(input.generics.clone(), quote!(::nbtkit::nbt::ToTag));
	let (to_impl, to_ty, to_where) = to_generics.split_for_impl();

	let merges = bindings.iter().map(|binding| {
		let ident = &binding.field.ident;
		let key = &binding.name;
		quote_spanned! {binding.field.span() =>
			if let ::core::option::Option::Some(child) = compound.get(#key) {
				::nbtkit::nbt::FromTag::merge_from(&mut self.#ident, child)?;
			}
		}
	});

	let inserts = bindings.iter().map(|binding| {
		let ident = &binding.field.ident;
		let key = &binding.name;
		quote_spanned! {binding.field.span() =>
			if let ::core::option::Option::Some(value) = ::nbtkit::nbt::ToTag::to_field_value(&self.#ident)? {
				compound.insert_value(#key, value);
			}
		}
	});

	let record = name.to_string();
	Ok(quote! {
		impl #from_impl ::nbtkit::nbt::FromTag for #name #from_ty #from_where {
			fn from_tag(tag: &::nbtkit::nbt::Tag) -> ::nbtkit::nbt::Result<Self> {
				let mut out = <Self as ::core::default::Default>::default();
				::nbtkit::nbt::FromTag::merge_from(&mut out, tag)?;
				::core::result::Result::Ok(out)
			}

			#[allow(unused_variables)]
			fn merge_from(&mut self, tag: &::nbtkit::nbt::Tag) -> ::nbtkit::nbt::Result<()> {
				let ::nbtkit::nbt::Value::Compound(compound) = &tag.value else {
					return ::core::result::Result::Err(::nbtkit::nbt::NbtError::TypeMismatch {
						expected: #record,
						found: ::std::string::ToString::to_string(&tag.kind()),
					});
				};
				#(#merges)*
				::core::result::Result::Ok(())
			}
		}

		impl #to_impl ::nbtkit::nbt::ToTag for #name #to_ty #to_where {
			#[allow(unused_mut)]
			fn to_value(&self) -> ::nbtkit::nbt::Result<::nbtkit::nbt::Value> {
				let mut compound = ::nbtkit::nbt::Compound::new();
				#(#inserts)*
				::core::result::Result::Ok(::nbtkit::nbt::Value::Compound(compound))
			}
		}
	})
}

fn collect_bindings(input: &DeriveInput) -> syn::Result<Vec<Binding<'_>>> {
	let fields = match &input.data {
		Data::Struct(data) => match &data.fields {
			Fields::Named(fields) => fields,
			Fields::Unnamed(_) | Fields::Unit => {
				return Err(syn::Error::new(input.ident.span(), "NbtBind requires a struct with named fields"));
			}
		},
		Data::Enum(data) => return Err(syn::Error::new(data.enum_token.span(), "NbtBind cannot be derived for enums")),
		Data::Union(data) => return Err(syn::Error::new(data.union_token.span(), "NbtBind cannot be derived for unions")),
	};

	let mut bindings = Vec::new();
	for field in &fields.named {
		if let Some(name) = binding_name(field)? {
			bindings.push(Binding { field, name });
		}
	}
	Ok(bindings)
}

// `#[nbt]` binds under the field identifier, `#[nbt(name = "...")]` under the given name.
fn binding_name(field: &Field) -> syn::Result<Option<String>> {
	let mut name = None;
	for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("nbt")) {
		let mut explicit = None;
		if let Meta::List(_) = attr.meta {
			attr.parse_nested_meta(|meta| {
				if meta.path.is_ident("name") {
					let lit: LitStr = meta.value()?.parse()?;
					explicit = Some(lit.value());
					Ok(())
				} else {
					Err(meta.error("unsupported nbt attribute, expected `name = \"...\"`"))
				}
			})?;
		} else if let Meta::NameValue(_) = attr.meta {
			return Err(syn::Error::new(attr.span(), "expected `#[nbt]` or `#[nbt(name = \"...\")]`"));
		}

		let fallback = || field.ident.as_ref().map(|ident| ident.unraw().to_string()).unwrap_or_default();
		name = Some(explicit.unwrap_or_else(fallback));
	}
	Ok(name)
}

// Add a bound `T: <bound>` to every type parameter T.
fn add_trait_bounds(mut generics: Generics, bound: TokenStream) -> Generics {
	for param in &mut generics.params {
		if let GenericParam::Type(type_param) = param {
			type_param.bounds.push(parse_quote!(#bound));
		}
	}
	generics
}
