//! Pre-built mock filesystem scenarios for testing.
//!
//! These scenarios provide realistic `/proc/self/mountstats` contents.

use super::filesystem::MockFs;

impl MockFs {
    /// Creates an NFS client with one mount per transport.
    ///
    /// Includes: a few local filesystems, an NFSv3 mount over UDP
    /// (statvers 1.0, no per-op error counts), an NFSv4.2 mount over TCP
    /// (statvers 1.1) and an NFSv4.1 mount over RDMA.
    pub fn nfs_client() -> Self {
        let mut fs = Self::new();
        fs.add_mountstats(
            "/proc",
            "\
device rootfs mounted on / with fstype rootfs
device proc mounted on /proc with fstype proc
device sysfs mounted on /sys with fstype sysfs
device /dev/sda1 mounted on /boot with fstype ext4
device fileserver:/srv/home mounted on /home with fstype nfs statvers=1.0
\topts:\trw,vers=3,rsize=32768,wsize=32768,namlen=255,acregmin=3,acregmax=60,acdirmin=30,acdirmax=60,hard,proto=udp,timeo=11,retrans=3,sec=sys,mountaddr=10.0.0.5,mountvers=3,mountport=635,mountproto=udp,local_lock=none
\tage:\t86400
\tcaps:\tcaps=0x3fc7,wtmult=512,dtsize=8192,bsize=0,namlen=255
\tsec:\tflavor=1,pseudoflavor=1
\tevents:\t5120 20480 12 340 900 4400 31000 2000 0 150 0 300 640 20 1800 10 0 880 0 2 1900 0 4 1 0
\tbytes:\t52428800 10485760 0 0 41943040 10485760 10240 2560
\tRPC iostats version: 1.0  p/v: 100003/3 (nfs)
\txprt:\tudp 877 0 48210 48207 3 96000 12
\tper-op statistics
\t        NULL: 0 0 0 0 0 0 0 0
\t     GETATTR: 5120 5121 1 614400 573440 10 2300 2400
\t     SETATTR: 20 20 0 3200 2880 0 15 16
\t      LOOKUP: 4400 4402 0 580800 1056000 12 3100 3200
\t      ACCESS: 900 900 0 108000 108000 2 400 420
\t        READ: 1280 1281 1 153600 42107136 40 9000 9100
\t       WRITE: 320 320 0 10537600 46080 60 5000 5100
\t      CREATE: 4 4 0 640 1120 0 3 3
\t      COMMIT: 16 16 0 1920 2304 0 40 41
device tank:/export/projects mounted on /mnt/projects with fstype nfs4 statvers=1.1
\topts:\trw,vers=4.2,rsize=1048576,wsize=1048576,namlen=255,acregmin=3,acregmax=60,acdirmin=30,acdirmax=60,hard,proto=tcp,timeo=600,retrans=2,sec=sys,clientaddr=10.0.0.21,local_lock=none
\tage:\t3600
\timpl_id:\tname='',domain='',date='0,0'
\tcaps:\tcaps=0xfffbc0b7,wtmult=512,dtsize=1048576,bsize=0,namlen=255
\tnfsv4:\tbm0=0xfdffafff,bm1=0xf9be3e,bm2=0x60800,acl=0x0,sessions,pnfs=not configured,lease_time=90,lease_expired=0
\tsec:\tflavor=1,pseudoflavor=1
\tevents:\t10432 443365 372 1673 6485 2502 561227 206063 0 409 0 589 12831 232 9793 90 0 9695 0 10 205921 0 0 0 0 0 0
\tbytes:\t109502449 121343899 0 0 10952332 121346572 2910 29875
\tRPC iostats version: 1.1  p/v: 100003/4 (nfs)
\txprt:\ttcp 0 0 60 0 10 28063 28031 3 653569 0 31 9925 9193
\tper-op statistics
\t        NULL: 1 1 0 44 24 2 3 6 0
\t        READ: 484 484 0 121212 11259100 23 2152 2190 0
\t       WRITE: 513 513 0 121747828 97008 260140 5367 265518 0
\t      COMMIT: 9 9 0 2124 936 0 70 70 0
\t        OPEN: 916 916 0 310636 251444 56 1957 2033 374
\t       CLOSE: 1921 1921 0 480620 264212 97 6005 6136 32
\t     GETATTR: 13920 13924 0 3187904 3394844 6668 27030 34563 7
\t      LOOKUP: 5109 5109 0 1274016 1197256 96 9244 9647 1728
\t    SEQUENCE: 3962 3988 0 542368 315916 47272 55618 102974 29
device ib-filer:/scratch mounted on /scratch with fstype nfs4 statvers=1.1
\topts:\trw,vers=4.1,rsize=1048576,wsize=1048576,namlen=255,hard,proto=rdma,port=20049,timeo=600,retrans=2,sec=sys,clientaddr=192.168.100.21,local_lock=none
\tage:\t7200
\tevents:\t300 1200 2 40 80 120 3000 500 0 20 0 40 60 4 70 3 0 75 0 0 480 0 0 0 0 12 34
\tbytes:\t2147483648 1073741824 0 0 2147483648 1073741824 524288 262144
\tRPC iostats version: 1.1  p/v: 100003/4 (nfs)
\txprt:\trdma 0 0 1 0 0 42000 41998 0 0 1024 512 8 40000 40001 0 0 0 0 0
\tper-op statistics
\t        NULL: 1 1 0 40 24 0 1 1 0
\t        READ: 2048 2048 0 270336 2147745792 5 4000 4100 0
\t       WRITE: 1024 1024 0 1073913856 135168 9 3000 3050 0
\t    SEQUENCE: 600 600 0 81600 48000 1 300 310 0
device tmpfs mounted on /run with fstype tmpfs
",
        );
        fs
    }

    /// Creates a host without any NFS mounts.
    pub fn local_only() -> Self {
        let mut fs = Self::new();
        fs.add_mountstats(
            "/proc",
            "\
device rootfs mounted on / with fstype rootfs
device proc mounted on /proc with fstype proc
device sysfs mounted on /sys with fstype sysfs
device devtmpfs mounted on /dev with fstype devtmpfs
device /dev/nvme0n1p2 mounted on / with fstype xfs
device /dev/nvme0n1p1 mounted on /boot/efi with fstype vfat
",
        );
        fs
    }
}
