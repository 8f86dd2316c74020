use super::*;

#[test]
fn linux_arm64_routes_to_package_manager() {
    let plan = plan_for(PlatformTarget::new(Os::Linux, Arch::Arm64));
    assert_eq!(plan, InstallPlan::PackageManager);
}

#[test]
fn linux_non_arm64_routes_to_archive() {
    for arch in [Arch::X64, Arch::Other] {
        let plan = plan_for(PlatformTarget::new(Os::Linux, arch));
        let InstallPlan::Archive(release) = plan else {
            panic!("linux/{} must install from an archive", arch.as_str());
        };
        assert_eq!(release.version, "v2024.7.2");
        assert!(release.download_url.contains("bw-linux"));
    }
}

#[test]
fn macos_routes_to_archive_on_every_arch() {
    for arch in [Arch::X64, Arch::Arm64, Arch::Other] {
        let plan = plan_for(PlatformTarget::new(Os::MacOs, arch));
        let InstallPlan::Archive(release) = plan else {
            panic!("macos/{} must install from an archive", arch.as_str());
        };
        assert_eq!(release.version, "v2024.7.2");
        assert!(release.download_url.contains("bw-macos"));
    }
}

#[test]
fn windows_keeps_its_older_pin() {
    let plan = plan_for(PlatformTarget::new(Os::Windows, Arch::Arm64));
    let InstallPlan::Archive(release) = plan else {
        panic!("windows must install from an archive");
    };
    assert_eq!(release.version, "v2024.2.1");
    assert!(release.download_url.contains("bw-windows"));
}

#[test]
fn archive_urls_embed_their_version_tag() {
    for os in [Os::Linux, Os::MacOs, Os::Windows] {
        let plan = plan_for(PlatformTarget::new(os, Arch::X64));
        let InstallPlan::Archive(release) = plan else {
            panic!("{} must install from an archive", os.as_str());
        };
        let tag = release.version.trim_start_matches('v');
        assert!(
            release.download_url.contains(tag),
            "{} url must carry version {}",
            os.as_str(),
            release.version
        );
        assert!(release.download_url.ends_with(".zip"));
    }
}

#[test]
fn client_file_name_carries_extension_only_on_windows() {
    assert_eq!(Os::Windows.client_file_name(), "bw.exe");
    assert_eq!(Os::Linux.client_file_name(), "bw");
    assert_eq!(Os::MacOs.client_file_name(), "bw");
}

#[test]
fn resolve_host_succeeds_on_supported_build_hosts() {
    let target = PlatformTarget::resolve_host().expect("test host must be supported");
    assert!(matches!(target.os, Os::Linux | Os::MacOs | Os::Windows));
}

#[test]
fn unsupported_platform_displays_os_and_arch() {
    let err = BootstrapError::UnsupportedPlatform {
        os: "freebsd".into(),
        arch: "x64".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains("freebsd"));
    assert!(msg.contains("x64"));
}

#[test]
fn download_error_displays_status_and_url() {
    let err = BootstrapError::Download {
        url: "https://example.test/bw.zip".into(),
        status: 404,
    };
    let msg = err.to_string();
    assert!(msg.contains("404"));
    assert!(msg.contains("https://example.test/bw.zip"));
}

#[test]
fn alternate_install_error_carries_stderr() {
    let err = BootstrapError::AlternateInstall {
        code: Some(1),
        stderr: "EACCES: permission denied".into(),
    };
    assert!(err.to_string().contains("EACCES: permission denied"));
}

#[test]
fn archive_entry_missing_names_the_entry() {
    let err = BootstrapError::ArchiveEntryMissing { entry: "bw".into() };
    assert!(err.to_string().contains("'bw'"));
}

#[test]
fn fresh_token_is_not_cancelled() {
    let token = CancelToken::new();
    assert!(!token.is_cancelled());
    token.ensure_active().expect("fresh token must be active");
}

#[test]
fn cancel_is_visible_through_clones() {
    let token = CancelToken::new();
    let handle = token.clone();
    handle.cancel();
    assert!(token.is_cancelled());
    let err = token.ensure_active().expect_err("cancelled token must error");
    assert!(matches!(err, BootstrapError::Cancelled));
}
