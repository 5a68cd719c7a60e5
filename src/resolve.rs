//! # Resolución y Validación de Rutas
//! src/resolve.rs
//!
//! Convierte la URI del request en una ruta del filesystem y decide si se
//! puede servir:
//!
//! 1. Clasificación estático/dinámico (la URI contiene `"cgi"` → dinámico)
//! 2. Ruta = document root + URI (`/` final → `index.html`)
//! 3. `stat` de la ruta → 404 si no existe
//! 4. Canonicalización de ruta y document root → 403 si sale del root
//! 5. Solo estático: archivo regular con bit de lectura del dueño → si no, 403
//!
//! El contenido dinámico nunca se sirve: pasa las mismas verificaciones
//! y termina en 501.

use crate::error::{ForbiddenReason, ServeError};
use std::ffi::OsString;
use std::fs::{self, Metadata};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Bit de lectura del dueño (`S_IRUSR`)
const OWNER_READ: u32 = 0o400;

/// Destino de una URI ya resuelta contra el document root
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Static { path: PathBuf },
    Dynamic { path: PathBuf, query: String },
}

impl Target {
    pub fn path(&self) -> &Path {
        match self {
            Target::Static { path } | Target::Dynamic { path, .. } => path,
        }
    }

    pub fn is_static(&self) -> bool {
        matches!(self, Target::Static { .. })
    }
}

/// Concatena root y URI tal cual (sin `Path::join`, que descartaría el root
/// cuando la URI empieza con `/`).
fn concat(doc_root: &Path, uri: &str) -> PathBuf {
    let mut raw = OsString::from(doc_root.as_os_str());
    raw.push(uri);
    PathBuf::from(raw)
}

/// Clasifica la URI y calcula la ruta en disco
///
/// # Ejemplo
/// ```
/// use static_server::resolve::{classify_and_resolve, Target};
/// use std::path::{Path, PathBuf};
///
/// let target = classify_and_resolve("/docs/", Path::new("/srv/www"));
/// assert_eq!(target, Target::Static { path: PathBuf::from("/srv/www/docs/index.html") });
/// ```
pub fn classify_and_resolve(uri: &str, doc_root: &Path) -> Target {
    if !uri.contains("cgi") {
        let mut path = concat(doc_root, uri);
        if uri.ends_with('/') {
            path.push("index.html");
        }
        return Target::Static { path };
    }

    // Dinámico: separar en el primer '?'
    let (path, query) = match uri.split_once('?') {
        Some((path, query)) => (path, query.to_string()),
        None => (uri, String::new()),
    };

    Target::Dynamic {
        path: concat(doc_root, path),
        query,
    }
}

/// Verifica que la ruta canónica quede dentro del document root canónico.
///
/// Si cualquiera de las dos no se puede canonicalizar (symlink roto,
/// permisos, ciclo) se trata como traversal.
pub fn check_containment(path: &Path, doc_root: &Path) -> Result<PathBuf, ServeError> {
    let forbidden = || ServeError::Forbidden {
        path: path.to_path_buf(),
        reason: ForbiddenReason::Traversal,
    };

    let real_path = fs::canonicalize(path).map_err(|_| forbidden())?;
    let real_root = fs::canonicalize(doc_root).map_err(|_| forbidden())?;

    if !real_path.starts_with(&real_root) {
        return Err(ServeError::Forbidden {
            path: real_path,
            reason: ForbiddenReason::Traversal,
        });
    }

    Ok(real_path)
}

/// Archivo regular con el bit de lectura del dueño
fn is_readable_file(meta: &Metadata) -> bool {
    meta.is_file() && meta.permissions().mode() & OWNER_READ != 0
}

/// Valida un destino ya clasificado y retorna su ruta canónica y tamaño.
///
/// Orden de las verificaciones: existencia (404), contención (403),
/// tipo de contenido (501 para dinámico), permisos (403). La ruta que se
/// retorna es la que se verificó contra el root: es la única que debe
/// abrirse después.
pub fn validate(target: &Target, doc_root: &Path) -> Result<(PathBuf, u64), ServeError> {
    let path = target.path();

    fs::metadata(path).map_err(|_| ServeError::NotFound(path.to_path_buf()))?;

    let real_path = check_containment(path, doc_root)?;

    if !target.is_static() {
        return Err(ServeError::DynamicContentUnsupported(path.to_path_buf()));
    }

    let meta = fs::metadata(&real_path).map_err(|_| ServeError::NotFound(path.to_path_buf()))?;
    if !is_readable_file(&meta) {
        return Err(ServeError::Forbidden {
            path: path.to_path_buf(),
            reason: ForbiddenReason::Permission,
        });
    }

    Ok((real_path, meta.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::fs::symlink;
    use tempfile::TempDir;

    /// Crea `tmp/root/` (document root) y `tmp/outside/secret.txt`
    fn layout() -> (TempDir, PathBuf) {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("root");
        fs::create_dir_all(root.join("docs")).unwrap();
        fs::create_dir_all(tmp.path().join("outside")).unwrap();
        fs::write(root.join("index.html"), "<h1>hi</h1>").unwrap();
        fs::write(root.join("docs/index.html"), "docs").unwrap();
        fs::write(tmp.path().join("outside/secret.txt"), "secret").unwrap();
        (tmp, root)
    }

    #[test]
    fn test_classify_static() {
        let target = classify_and_resolve("/a.html", Path::new("/srv"));
        assert_eq!(
            target,
            Target::Static {
                path: PathBuf::from("/srv/a.html")
            }
        );
    }

    #[test]
    fn test_classify_static_keeps_question_mark() {
        let target = classify_and_resolve("/a.html?x=1", Path::new("."));
        assert_eq!(target.path(), Path::new("./a.html?x=1"));
        assert!(target.is_static());
    }

    #[test]
    fn test_classify_trailing_slash_appends_index() {
        let target = classify_and_resolve("/", Path::new("."));
        assert_eq!(target.path(), Path::new("./index.html"));
    }

    #[test]
    fn test_classify_dynamic_splits_query() {
        let target = classify_and_resolve("/cgi-bin/run?a=1?b=2", Path::new("."));
        assert_eq!(
            target,
            Target::Dynamic {
                path: PathBuf::from("./cgi-bin/run"),
                query: "a=1?b=2".to_string(),
            }
        );
    }

    #[test]
    fn test_classify_dynamic_without_query() {
        let target = classify_and_resolve("/cgi", Path::new("."));
        assert!(matches!(target, Target::Dynamic { ref query, .. } if query.is_empty()));
    }

    #[test]
    fn test_validate_ok_returns_canonical_path_and_size() {
        let (_tmp, root) = layout();
        let target = classify_and_resolve("/", &root);
        let (path, size) = validate(&target, &root).unwrap();
        assert_eq!(size, 11);
        assert_eq!(path, fs::canonicalize(root.join("index.html")).unwrap());
    }

    #[test]
    fn test_validate_resolves_symlinked_directory_inside_root() {
        let (_tmp, root) = layout();
        symlink(root.join("docs"), root.join("alias")).unwrap();

        let target = classify_and_resolve("/alias/index.html", &root);
        let (path, size) = validate(&target, &root).unwrap();
        assert_eq!(path, fs::canonicalize(root.join("docs/index.html")).unwrap());
        assert_eq!(size, 4);
    }

    #[test]
    fn test_validate_missing_is_not_found() {
        let (_tmp, root) = layout();
        let target = classify_and_resolve("/nope.html", &root);
        assert!(matches!(validate(&target, &root), Err(ServeError::NotFound(_))));
    }

    #[test]
    fn test_validate_traversal_is_forbidden() {
        let (_tmp, root) = layout();
        let target = classify_and_resolve("/../outside/secret.txt", &root);
        assert!(matches!(
            validate(&target, &root),
            Err(ServeError::Forbidden {
                reason: ForbiddenReason::Traversal,
                ..
            })
        ));
    }

    #[test]
    fn test_validate_symlink_escape_is_forbidden() {
        let (tmp, root) = layout();
        symlink(tmp.path().join("outside/secret.txt"), root.join("link.txt")).unwrap();

        let target = classify_and_resolve("/link.txt", &root);
        assert!(matches!(
            validate(&target, &root),
            Err(ServeError::Forbidden {
                reason: ForbiddenReason::Traversal,
                ..
            })
        ));
    }

    #[test]
    fn test_sibling_with_common_prefix_is_outside() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("www");
        let sibling = tmp.path().join("www2");
        fs::create_dir_all(&root).unwrap();
        fs::create_dir_all(&sibling).unwrap();
        fs::write(sibling.join("a.txt"), "x").unwrap();

        let result = check_containment(&sibling.join("a.txt"), &root);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_root_is_forbidden() {
        let (tmp, root) = layout();
        let ghost = tmp.path().join("ghost");
        let result = check_containment(&root.join("index.html"), &ghost);
        assert!(matches!(
            result,
            Err(ServeError::Forbidden {
                reason: ForbiddenReason::Traversal,
                ..
            })
        ));
    }

    #[test]
    fn test_validate_directory_is_forbidden() {
        let (_tmp, root) = layout();
        let target = classify_and_resolve("/docs", &root);
        assert!(matches!(
            validate(&target, &root),
            Err(ServeError::Forbidden {
                reason: ForbiddenReason::Permission,
                ..
            })
        ));
    }

    #[test]
    fn test_validate_unreadable_is_forbidden() {
        let (_tmp, root) = layout();
        let file = root.join("locked.txt");
        fs::write(&file, "locked").unwrap();
        fs::set_permissions(&file, fs::Permissions::from_mode(0o200)).unwrap();

        let target = classify_and_resolve("/locked.txt", &root);
        assert!(matches!(
            validate(&target, &root),
            Err(ServeError::Forbidden {
                reason: ForbiddenReason::Permission,
                ..
            })
        ));
    }

    #[test]
    fn test_validate_dynamic_is_not_implemented() {
        let (_tmp, root) = layout();
        fs::create_dir_all(root.join("cgi-bin")).unwrap();
        fs::write(root.join("cgi-bin/run"), "#!/bin/sh").unwrap();

        let target = classify_and_resolve("/cgi-bin/run?x=1", &root);
        assert!(matches!(
            validate(&target, &root),
            Err(ServeError::DynamicContentUnsupported(_))
        ));
    }
}
