use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::{TempDir, tempdir};

fn write_fixtures() -> (TempDir, PathBuf, PathBuf) {
    let tmp = tempdir().unwrap();
    let passwd = tmp.path().join("passwd");
    let shadow = tmp.path().join("shadow");
    {
        let mut f = fs::File::create(&passwd).unwrap();
        writeln!(f, "root:x:0:0:root:/root:/bin/bash").unwrap();
        writeln!(f).unwrap();
        writeln!(f, "alice:x:1000:1000:Alice:/home/alice:/bin/bash").unwrap();
        writeln!(f, "bob:x:1001:1001:Bob:/home/bob:/bin/sh").unwrap();
    }
    {
        let mut f = fs::File::create(&shadow).unwrap();
        writeln!(f, "root:$6$roothash:19000:0:99999:7:::").unwrap();
        writeln!(f, "alice:$6$hash:18000:0:99999:7:::").unwrap();
        writeln!(f, "bob:!:18000:0:99999:7:::").unwrap();
    }
    (tmp, passwd, shadow)
}

fn linuxuser(passwd: &Path, shadow: &Path) -> Command {
    let mut cmd = Command::cargo_bin("linuxuser").unwrap();
    cmd.arg("--passwd")
        .arg(passwd)
        .arg("--shadow")
        .arg(shadow)
        .arg("--color")
        .arg("never");
    cmd
}

#[test]
fn list_prints_every_account() {
    let (_tmp, passwd, shadow) = write_fixtures();
    linuxuser(&passwd, &shadow)
        .args(["--as-uid", "0", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("USER"))
        .stdout(predicate::str::contains("/home/alice"))
        .stdout(predicate::str::contains("locked"));
}

#[test]
fn lookup_shows_aging_when_privileged() {
    let (_tmp, passwd, shadow) = write_fixtures();
    linuxuser(&passwd, &shadow)
        .args(["--as-uid", "0", "lookup", "alice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Last changed: 2019-04-14 (18000)"))
        .stdout(predicate::str::contains("$6$hash").not());
}

#[test]
fn unprivileged_lookup_has_no_shadow_data() {
    let (tmp, passwd, _shadow) = write_fixtures();
    // shadow path does not exist; an unprivileged identity must not care
    linuxuser(&passwd, &tmp.path().join("missing-shadow"))
        .args(["--as-uid", "1000", "lookup", "alice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Password:     empty"));
}

#[test]
fn privileged_missing_shadow_fails() {
    let (tmp, passwd, _shadow) = write_fixtures();
    linuxuser(&passwd, &tmp.path().join("missing-shadow"))
        .args(["--as-uid", "0", "list"])
        .assert()
        .code(3);
}

#[test]
fn current_follows_effective_uid() {
    let (_tmp, passwd, shadow) = write_fixtures();
    linuxuser(&passwd, &shadow)
        .args(["--as-uid", "1001", "current"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Username:     bob"));
}

#[test]
fn current_without_account_fails_but_lookup_miss_is_distinct() {
    let (_tmp, passwd, shadow) = write_fixtures();
    linuxuser(&passwd, &shadow)
        .args(["--as-uid", "4242", "current"])
        .assert()
        .code(3);
    linuxuser(&passwd, &shadow)
        .args(["--as-uid", "4242", "lookup", "nonexistent"])
        .assert()
        .code(4);
    linuxuser(&passwd, &shadow)
        .args(["--as-uid", "4242", "id", "4242"])
        .assert()
        .code(4);
}

#[test]
fn csv_format_writes_rows() {
    let (_tmp, passwd, shadow) = write_fixtures();
    linuxuser(&passwd, &shadow)
        .args(["--as-uid", "0", "--format", "csv", "id", "1000"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("username,uid,gid"))
        .stdout(predicate::str::contains(
            "alice,1000,1000,Alice,/home/alice,/bin/bash,hashed,18000,0,99999,7,0,0",
        ));
}

#[test]
fn malformed_passwd_line_fails() {
    let tmp = tempdir().unwrap();
    let passwd = tmp.path().join("passwd");
    fs::write(&passwd, "bob:x:notanumber:1000:Bob:/home/bob:/bin/sh\n").unwrap();
    linuxuser(&passwd, &tmp.path().join("shadow"))
        .args(["--as-uid", "1000", "list"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("uid"));
}

#[test]
fn negative_uid_resolves() {
    let tmp = tempdir().unwrap();
    let passwd = tmp.path().join("passwd");
    fs::write(&passwd, "nfsnobody:x:-2:-2:::\nalice:x:1000:1000:Alice:/home/alice:/bin/bash\n")
        .unwrap();
    linuxuser(&passwd, &tmp.path().join("shadow"))
        .args(["--as-uid", "1000", "id", "-2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Username:     nfsnobody"));
}

#[test]
fn account_with_default_fields_is_still_found() {
    let tmp = tempdir().unwrap();
    let passwd = tmp.path().join("passwd");
    fs::write(&passwd, ":x:0:0:::\n").unwrap();
    linuxuser(&passwd, &tmp.path().join("shadow"))
        .args(["--as-uid", "1000", "id", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("UID:          0"));
}

#[test]
fn missing_passwd_file_causes_exit_2() {
    let tmp = tempdir().unwrap();
    linuxuser(&tmp.path().join("missing-passwd"), &tmp.path().join("shadow"))
        .arg("list")
        .assert()
        .code(2);
}

#[test]
fn library_api_with_forced_mmap() {
    use linuxuser::prelude::*;

    let (_tmp, passwd, shadow) = write_fixtures();
    let config = RegistryConfig::new()
        .with_passwd_path(passwd)
        .with_shadow_path(shadow)
        .with_mmap_threshold(32);
    let registry = Registry::new(config, FixedIdentity::root());
    let all = registry.all().unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[2].shadow.password, "!");
    assert_eq!(registry.current().unwrap().username, "root");
}
