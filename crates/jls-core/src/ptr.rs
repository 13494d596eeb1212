//! `Ptr`: a stable, compilation-independent identity for a Java declaration.

use smol_str::SmolStr;

/// Identity of a Java declaration that survives recompilation: two
/// declarations resolved from different compilations of the same source
/// compare equal under `Ptr` iff they denote the same program element.
///
/// A `Ptr` is built from an owner chain (package plus enclosing class simple
/// names) plus the declaration's own simple name, plus — for methods and
/// constructors — an ordered list of erased parameter type descriptors.
/// Constructors reuse the declaring class's simple name as `name`; they are
/// distinguished from the class declaration itself by `params` being `Some`.
#[derive(Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Ptr {
    package: SmolStr,
    enclosing_classes: Vec<SmolStr>,
    name: SmolStr,
    params: Option<Vec<SmolStr>>,
}

impl Ptr {
    /// A top-level or nested class/interface/enum/annotation declaration.
    ///
    /// `enclosing_classes` lists the classes strictly containing this one,
    /// outermost first; empty for a top-level type. `package` is empty for
    /// the default package.
    pub fn for_class(
        package: impl Into<SmolStr>,
        enclosing_classes: impl IntoIterator<Item = impl Into<SmolStr>>,
        simple_name: impl Into<SmolStr>,
    ) -> Self {
        Self {
            package: package.into(),
            enclosing_classes: enclosing_classes.into_iter().map(Into::into).collect(),
            name: simple_name.into(),
            params: None,
        }
    }

    /// Construct a class `Ptr` from a package name and a dotted class path
    /// (`Outer.Inner` for a nested class, just `Name` for a top-level one).
    /// This is the "from (package, class)" constructor required by the
    /// data model.
    pub fn from_package_and_class(package: impl Into<SmolStr>, qualified_class: &str) -> Self {
        let mut segments = qualified_class.split('.');
        let mut enclosing = Vec::new();
        let mut last = segments.next().unwrap_or_default();
        for seg in segments {
            enclosing.push(SmolStr::new(last));
            last = seg;
        }
        Self::for_class(package, enclosing, last)
    }

    /// A field (or other non-executable member) declared directly on
    /// `owner`.
    pub fn for_field(owner: &Ptr, name: impl Into<SmolStr>) -> Self {
        Self {
            package: owner.package.clone(),
            enclosing_classes: owner.class_chain(),
            name: name.into(),
            params: None,
        }
    }

    /// A method declared directly on `owner`, identified by name plus the
    /// ordered list of erased parameter type descriptors.
    pub fn for_method(
        owner: &Ptr,
        name: impl Into<SmolStr>,
        params: impl IntoIterator<Item = impl Into<SmolStr>>,
    ) -> Self {
        Self {
            package: owner.package.clone(),
            enclosing_classes: owner.class_chain(),
            name: name.into(),
            params: Some(params.into_iter().map(Into::into).collect()),
        }
    }

    /// A constructor of `owner`. Per the data model, constructors use the
    /// literal owner simple name as `name`.
    pub fn for_constructor(
        owner: &Ptr,
        params: impl IntoIterator<Item = impl Into<SmolStr>>,
    ) -> Self {
        Self::for_method(owner, owner.simple_name().to_owned(), params)
    }

    /// The chain of classes a member declared on `self` would be nested
    /// under: `self`'s own enclosing classes plus `self` itself. Only
    /// meaningful when `self` is itself a class `Ptr` (`params.is_none()`
    /// and it was built via `for_class`/`from_package_and_class`).
    fn class_chain(&self) -> Vec<SmolStr> {
        let mut chain = self.enclosing_classes.clone();
        chain.push(self.name.clone());
        chain
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn simple_name(&self) -> &str {
        &self.name
    }

    pub fn is_method(&self) -> bool {
        self.params.is_some()
    }

    pub fn params(&self) -> Option<&[SmolStr]> {
        self.params.as_deref()
    }

    /// `true` if this pointer's `name` equals the simple name of its
    /// innermost enclosing class and it carries parameters — i.e. it is a
    /// constructor rather than a plain method.
    pub fn is_constructor(&self) -> bool {
        self.is_method() && self.enclosing_classes.last() == Some(&self.name)
    }
}

impl std::fmt::Display for Ptr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.package.is_empty() {
            write!(f, "{}.", self.package)?;
        }
        for c in &self.enclosing_classes {
            write!(f, "{c}.")?;
        }
        f.write_str(&self.name)?;
        if let Some(params) = &self.params {
            f.write_str("(")?;
            for (i, p) in params.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                f.write_str(p)?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_less_class_has_empty_package() {
        let p = Ptr::for_class("", [] as [&str; 0], "Foo");
        assert_eq!(p.package(), "");
        assert_eq!(p.simple_name(), "Foo");
    }

    #[test]
    fn nested_class_from_dotted_path() {
        let p = Ptr::from_package_and_class("com.acme", "Outer.Inner");
        let expected = Ptr::for_class("com.acme", ["Outer"], "Inner");
        assert_eq!(p, expected);
    }

    #[test]
    fn constructor_equals_itself_across_rebuilds() {
        let owner = Ptr::for_class("com.acme", [] as [&str; 0], "Foo");
        let a = Ptr::for_constructor(&owner, ["int"]);
        let b = Ptr::for_constructor(&owner, ["int"]);
        assert_eq!(a, b);
        assert!(a.is_constructor());
    }

    #[test]
    fn method_and_field_on_same_owner_do_not_collide() {
        let owner = Ptr::for_class("com.acme", [] as [&str; 0], "Foo");
        let field = Ptr::for_field(&owner, "run");
        let method = Ptr::for_method(&owner, "run", [] as [&str; 0]);
        assert_ne!(field, method);
    }

    #[test]
    fn overloads_distinguished_by_params() {
        let owner = Ptr::for_class("com.acme", [] as [&str; 0], "Foo");
        let a = Ptr::for_method(&owner, "m", ["int"]);
        let b = Ptr::for_method(&owner, "m", ["java.lang.String"]);
        assert_ne!(a, b);
    }
}
