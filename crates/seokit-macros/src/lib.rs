//! Proc-macros for the seokit configuration system.
//!
//! `#[derive(Configurable)]` generates two methods on a named-field struct:
//!
//! - `apply_override(&mut self, key, value)` for `--config KEY=VALUE` flags,
//!   recursing into `#[config(nested)]` tables through dotted keys.
//! - `merge_fields(&mut self, other)` for layering several config files.
//!
//! The generated code expects `crate::error::ConfigError` to exist with a
//! `Override(String)` variant.

use proc_macro::TokenStream;
use quote::{ToTokens, quote};
use syn::{Attribute, Data, DeriveInput, Fields, Ident, Type, parse_macro_input};

/// Parsed `#[config(...)]` attributes of one field.
#[derive(Default)]
struct FieldAttrs {
  key:         Option<String>,
  nested:      bool,
  allow_empty: bool,
  /// Whether the field carries any `#[config]` attribute at all.
  present:     bool,
}

impl FieldAttrs {
  fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
    let mut parsed = Self::default();

    for attr in attrs.iter().filter(|a| a.path().is_ident("config")) {
      parsed.present = true;
      attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("key") {
          let lit: syn::LitStr = meta.value()?.parse()?;
          parsed.key = Some(lit.value());
          Ok(())
        } else if meta.path.is_ident("nested") {
          parsed.nested = true;
          Ok(())
        } else if meta.path.is_ident("allow_empty") {
          parsed.allow_empty = true;
          Ok(())
        } else {
          Err(meta.error("unsupported config attribute"))
        }
      })?;
    }

    Ok(parsed)
  }
}

/// How a field participates in overrides and merges, derived from its type.
#[derive(Clone, Copy, PartialEq, Eq)]
enum FieldKind {
  /// `Vec<T>` or a map: appended on merge, not overridable.
  Collection,
  /// `Option<T>`: replaced on merge only when the other side is `Some`.
  Optional,
  Path,
  Text,
  Flag,
  /// Anything else implementing `FromStr`.
  Parsed,
}

impl FieldKind {
  fn of(ty: &Type) -> Self {
    // Token streams print generics with spaces, so normalise first.
    let name: String = ty
      .to_token_stream()
      .to_string()
      .chars()
      .filter(|c| !c.is_whitespace())
      .collect();

    if name.starts_with("Vec<")
      || name.contains("HashMap<")
      || name.contains("BTreeMap<")
    {
      Self::Collection
    } else if name.starts_with("Option<") {
      Self::Optional
    } else if name.ends_with("PathBuf") {
      Self::Path
    } else if name == "String" {
      Self::Text
    } else if name == "bool" {
      Self::Flag
    } else {
      Self::Parsed
    }
  }
}

/// Derive macro for configuration structs.
#[proc_macro_derive(Configurable, attributes(config))]
pub fn derive_configurable(input: TokenStream) -> TokenStream {
  let input = parse_macro_input!(input as DeriveInput);
  expand(&input)
    .unwrap_or_else(syn::Error::into_compile_error)
    .into()
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
  let name = &input.ident;
  let (impl_generics, ty_generics, where_clause) =
    input.generics.split_for_impl();

  let Data::Struct(data) = &input.data else {
    return Err(syn::Error::new_spanned(
      input,
      "Configurable can only be derived for structs",
    ));
  };
  let Fields::Named(fields) = &data.fields else {
    return Err(syn::Error::new_spanned(
      input,
      "Configurable requires named fields",
    ));
  };

  let mut override_arms = Vec::new();
  let mut merge_steps = Vec::new();

  for field in &fields.named {
    let Some(ident) = field.ident.as_ref() else {
      continue;
    };
    let attrs = FieldAttrs::parse(&field.attrs)?;
    let kind = FieldKind::of(&field.ty);

    merge_steps.push(merge_step(ident, kind, &attrs));

    if attrs.present || attrs.nested {
      let key = attrs.key.clone().unwrap_or_else(|| ident.to_string());
      override_arms.push(override_arm(ident, &key, kind, &attrs));
    }
  }

  Ok(quote! {
    impl #impl_generics #name #ty_generics #where_clause {
      /// Apply a configuration override by key.
      ///
      /// # Errors
      ///
      /// Returns an error for unknown keys and for values that cannot be
      /// parsed as the field's type.
      pub fn apply_override(
        &mut self,
        key: &str,
        value: &str,
      ) -> std::result::Result<(), crate::error::ConfigError> {
        use crate::error::ConfigError;

        #(#override_arms)*

        Err(ConfigError::Override(format!(
          "Unknown configuration key: '{key}'",
        )))
      }

      /// Merge another config into this one, the other side taking
      /// precedence.
      pub fn merge_fields(&mut self, other: Self) {
        #(#merge_steps)*
      }
    }
  })
}

fn override_arm(
  ident: &Ident,
  key: &str,
  kind: FieldKind,
  attrs: &FieldAttrs,
) -> proc_macro2::TokenStream {
  if attrs.nested {
    let prefix = format!("{key}.");
    return quote! {
      if let Some(subkey) = key.strip_prefix(#prefix) {
        return self
          .#ident
          .get_or_insert_with(Default::default)
          .apply_override(subkey, value);
      }
    };
  }

  let invalid = quote! {
    |_| ConfigError::Override(format!(
      "Invalid value for '{}': '{}'", #key, value
    ))
  };

  let assignment = match kind {
    FieldKind::Collection => return quote! {},
    FieldKind::Optional if attrs.allow_empty => {
      quote! {
        self.#ident = if value.is_empty() {
          None
        } else {
          Some(value.parse().map_err(#invalid)?)
        };
      }
    },
    FieldKind::Optional => {
      quote! { self.#ident = Some(value.parse().map_err(#invalid)?); }
    },
    FieldKind::Path => {
      quote! { self.#ident = std::path::PathBuf::from(value); }
    },
    FieldKind::Text => quote! { self.#ident = value.to_string(); },
    FieldKind::Flag => {
      quote! {
        self.#ident = match value.to_ascii_lowercase().as_str() {
          "true" | "yes" | "1" => true,
          "false" | "no" | "0" => false,
          _ => {
            return Err(ConfigError::Override(format!(
              "Invalid boolean value for '{}': '{}'. Expected true/false, \
               yes/no, or 1/0",
              #key, value
            )));
          },
        };
      }
    },
    FieldKind::Parsed => {
      quote! { self.#ident = value.parse().map_err(#invalid)?; }
    },
  };

  quote! {
    if key == #key {
      #assignment
      return Ok(());
    }
  }
}

fn merge_step(
  ident: &Ident,
  kind: FieldKind,
  attrs: &FieldAttrs,
) -> proc_macro2::TokenStream {
  if attrs.nested || kind == FieldKind::Optional {
    return quote! {
      if other.#ident.is_some() {
        self.#ident = other.#ident;
      }
    };
  }

  match kind {
    FieldKind::Collection => quote! { self.#ident.extend(other.#ident); },
    _ => quote! { self.#ident = other.#ident; },
  }
}
