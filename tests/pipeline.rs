use std::fs;
use std::path::Path;

use kcpp_tools::pipeline::Pipeline;

fn write(path: &Path, text: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, text).unwrap();
}

#[test]
fn rewrites_tree_and_generates_header() {
    let tmp = tempfile::tempdir().unwrap();
    let tree = tmp.path().join("code");
    write(
        &tree.join("a.cpp"),
        "INCLUDE_KASSET()\nvoid f() { load(KASSET(\"img/a.png\")); }\n",
    );
    write(
        &tree.join("sub/b.cpp"),
        "void g() { load(KASSET(\"img/a.png\")); }\n",
    );

    Pipeline::new(&tree, false).unwrap().run().unwrap();

    // original text moved aside untouched
    let backup = tmp.path().join("code_backup");
    assert!(
        fs::read_to_string(backup.join("a.cpp"))
            .unwrap()
            .contains("KASSET(\"img/a.png\")")
    );

    // both call sites reference the single interned slot
    let a = fs::read_to_string(tree.join("a.cpp")).unwrap();
    assert_eq!(
        a,
        "#include \"gen_kassets.h\"\nvoid f() { load(&g_kassets[0]); }\n"
    );
    let b = fs::read_to_string(tree.join("sub/b.cpp")).unwrap();
    assert_eq!(b, "void g() { load(&g_kassets[0]); }\n");

    // exactly one table entry
    let header = fs::read_to_string(tree.join("gen_kassets.h")).unwrap();
    assert_eq!(header.matches("img/a.png").count(), 1);
    assert!(header.contains("findKAssetCStr"));

    // state marker is gone after a clean run
    assert!(!tmp.path().join("code_backup.state").exists());
}

#[test]
fn generated_header_is_read_only() {
    let tmp = tempfile::tempdir().unwrap();
    let tree = tmp.path().join("code");
    write(&tree.join("a.cpp"), "KASSET(\"a.png\")");

    Pipeline::new(&tree, false).unwrap().run().unwrap();

    let meta = fs::metadata(tree.join("gen_kassets.h")).unwrap();
    assert!(meta.permissions().readonly());
}

#[test]
fn no_header_written_without_asset_references() {
    let tmp = tempfile::tempdir().unwrap();
    let tree = tmp.path().join("code");
    write(&tree.join("a.cpp"), "int main() { return 0; }\n");

    Pipeline::new(&tree, false).unwrap().run().unwrap();

    assert!(!tree.join("gen_kassets.h").exists());
    // the file itself is still rewritten (verbatim here)
    assert_eq!(
        fs::read_to_string(tree.join("a.cpp")).unwrap(),
        "int main() { return 0; }\n"
    );
}

#[test]
fn timestamps_are_preserved() {
    let tmp = tempfile::tempdir().unwrap();
    let tree = tmp.path().join("code");
    write(&tree.join("a.cpp"), "KASSET(\"a.png\")");
    let before = fs::metadata(tree.join("a.cpp")).unwrap().modified().unwrap();

    Pipeline::new(&tree, false).unwrap().run().unwrap();

    let after = fs::metadata(tree.join("a.cpp")).unwrap().modified().unwrap();
    assert_eq!(before, after);
}

#[test]
fn header_bytes_are_deterministic_across_runs() {
    let mut headers = Vec::new();
    for _ in 0..2 {
        let tmp = tempfile::tempdir().unwrap();
        let tree = tmp.path().join("code");
        write(&tree.join("a.cpp"), "KASSET(\"one.png\") KASSET(\"two.fbm\")");
        write(&tree.join("b.cpp"), "KASSET(\"three.wav\")");
        Pipeline::new(&tree, false).unwrap().run().unwrap();
        headers.push(fs::read_to_string(tree.join("gen_kassets.h")).unwrap());
    }
    assert_eq!(headers[0], headers[1]);
    // sorted traversal: a.cpp's names come first, implied sibling last
    let idx = |name: &str| headers[0].find(name).unwrap();
    assert!(idx("one.png") < idx("two.fbm"));
    assert!(idx("two.fbm") < idx("three.wav"));
    assert!(idx("three.wav") < idx("two.png"));
}

#[test]
fn interrupted_run_is_refused() {
    let tmp = tempfile::tempdir().unwrap();
    let tree = tmp.path().join("code");
    write(&tree.join("a.cpp"), "x");
    fs::write(tmp.path().join("code_backup.state"), "rebuilding").unwrap();

    let err = Pipeline::new(&tree, false).unwrap().run().unwrap_err();
    assert!(err.to_string().contains("interrupted"), "got: {err:#}");
    // nothing was renamed
    assert!(tree.join("a.cpp").exists());
}

#[test]
fn macro_definitions_survive_verbatim() {
    let tmp = tempfile::tempdir().unwrap();
    let tree = tmp.path().join("code");
    let src = "#define KASSET_SEARCH(x) foo\nKASSET_SEARCH(y)\n";
    write(&tree.join("a.cpp"), src);

    Pipeline::new(&tree, false).unwrap().run().unwrap();

    assert_eq!(
        fs::read_to_string(tree.join("a.cpp")).unwrap(),
        "#define KASSET_SEARCH(x) foo\nfindKAssetCStr(y)\n"
    );
}
