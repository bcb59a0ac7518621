//! Contains sluice macros
//!
//! used to embed migration files
extern crate proc_macro;

use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use sluice_core::{FsSource, LocalFs};
use std::env;
use std::path::PathBuf;
use syn::{parse_macro_input, LitStr};

fn migration_fn_quoted(files: Vec<TokenStream2>) -> TokenStream2 {
    quote! {
        pub fn filesystem() -> ::sluice::MemoryFs {
            ::sluice::MemoryFs::from_static(&[#(#files),*])
        }

        pub fn source() -> ::std::result::Result<::sluice::FsSource<::sluice::MemoryFs>, ::sluice::Error> {
            ::sluice::FsSource::new(filesystem(), ".")
        }
    }
}

/// embeds migration files and inserts a module called `migrations` with two functions,
/// `filesystem` returning a [MemoryFs](../sluice/struct.MemoryFs.html) holding the embedded files,
/// and `source` returning a [FsSource](../sluice/struct.FsSource.html) serving them.
///
/// when called without arguments `embed_migrations` looks for migration files in a directory called `migrations` at the root level of your crate.
/// if you want to specify another directory call `embed_migrations` with its location relative to the root level of your crate.
///
/// Only files directly in the directory named in the format `{1}_{2}.{3}.{4}` are embedded, where `{1}` represents the migration version,
/// `{2}` the identifier, `{3}` the direction, `up` or `down`, and `{4}` the extension.
/// Two files with the same version and direction are a compile error.
#[proc_macro]
pub fn embed_migrations(input: TokenStream) -> TokenStream {
    let (location, span) = if input.is_empty() {
        ("migrations".to_string(), Span::call_site())
    } else {
        let location: LitStr = parse_macro_input!(input);
        (location.value(), location.span())
    };

    // safe to call unwrap as cargo always sets CARGO_MANIFEST_DIR when building proc macros
    let root = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap()).join(&location);

    let source = match FsSource::new(LocalFs::new(&root), ".") {
        Ok(source) => source,
        Err(err) => {
            let message = format!("could not embed migrations from {}, {}", root.display(), err);
            return syn::Error::new(span, message).to_compile_error().into();
        }
    };

    let mut files = Vec::new();
    for (_, up, down) in source.migrations().iter() {
        for migration in up.into_iter().chain(down) {
            let name = migration.raw();
            let path = root.join(name);
            let path = path.to_string_lossy().into_owned();
            files.push(quote! {(#name, include_bytes!(#path) as &'static [u8])});
        }
    }

    let fnq = migration_fn_quoted(files);
    let result = quote! {
        pub mod migrations {
            #fnq
        }
    };
    result.into()
}
